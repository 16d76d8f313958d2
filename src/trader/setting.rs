//! Global setting of the chart application.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use std::sync::RwLock;

use super::utility::get_file_path;

/// Default settings
fn default_settings() -> HashMap<String, SettingValue> {
    let mut settings = HashMap::new();

    // Log settings
    settings.insert("log.active".to_string(), SettingValue::Bool(true));
    settings.insert("log.level".to_string(), SettingValue::Int(20)); // INFO level
    settings.insert("log.console".to_string(), SettingValue::Bool(true));
    settings.insert("log.file".to_string(), SettingValue::Bool(false));

    // Datafeed settings
    settings.insert("datafeed.name".to_string(), SettingValue::String("binance".to_string()));
    settings.insert(
        "datafeed.host".to_string(),
        SettingValue::String("https://api.binance.com".to_string()),
    );
    settings.insert("datafeed.proxy_host".to_string(), SettingValue::String(String::new()));
    settings.insert("datafeed.proxy_port".to_string(), SettingValue::Int(0));

    // Chart settings
    settings.insert("chart.width".to_string(), SettingValue::Float(1.0));
    settings.insert("chart.body_ratio".to_string(), SettingValue::Float(0.6));
    settings.insert("chart.alpha".to_string(), SettingValue::Float(0.7));

    settings
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SettingValue {
    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            SettingValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Global settings container
pub struct Settings {
    settings: RwLock<HashMap<String, SettingValue>>,
}

impl Settings {
    /// Create new Settings with defaults, overlaid by the setting file in the temp folder
    pub fn new() -> Self {
        let settings = Self::with_defaults();
        if let Some(file_settings) = load_settings_from_file(&get_file_path(SETTING_FILENAME)) {
            settings.update(file_settings);
        }
        settings
    }

    /// Create Settings holding only the defaults
    pub fn with_defaults() -> Self {
        Self {
            settings: RwLock::new(default_settings()),
        }
    }

    /// Create Settings from defaults overlaid by an explicit JSON file
    pub fn from_file(path: &Path) -> Self {
        let settings = Self::with_defaults();
        match load_settings_from_file(path) {
            Some(file_settings) => settings.update(file_settings),
            None => tracing::debug!("no usable settings at {}", path.display()),
        }
        settings
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.settings.read().ok()?.get(key).cloned()
    }

    /// Get a string setting
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Get an integer setting
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    /// Get a float setting
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_float())
    }

    /// Get a bool setting
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Set a setting value
    pub fn set(&self, key: impl Into<String>, value: SettingValue) {
        if let Ok(mut settings) = self.settings.write() {
            settings.insert(key.into(), value);
        }
    }

    /// Update settings from a map
    pub fn update(&self, new_settings: HashMap<String, SettingValue>) {
        if let Ok(mut settings) = self.settings.write() {
            for (key, value) in new_settings {
                settings.insert(key, value);
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        let snapshot = self
            .settings
            .read()
            .map(|settings| settings.clone())
            .unwrap_or_default();
        let json = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Setting filename
pub const SETTING_FILENAME: &str = "chart_setting.json";

/// Load settings from JSON file
fn load_settings_from_file(filepath: &Path) -> Option<HashMap<String, SettingValue>> {
    if !filepath.exists() {
        return None;
    }

    let content = match fs::read_to_string(filepath) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("failed to read {}: {}", filepath.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!("ignoring malformed {}: {}", filepath.display(), e);
            None
        }
    }
}

/// Global settings instance
pub static SETTINGS: Lazy<Settings> = Lazy::new(Settings::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_value_types() {
        let s = SettingValue::String("test".to_string());
        assert_eq!(s.as_str(), Some("test"));

        let i = SettingValue::Int(42);
        assert_eq!(i.as_int(), Some(42));
        assert_eq!(i.as_float(), Some(42.0));

        let f = SettingValue::Float(0.7);
        assert_eq!(f.as_float(), Some(0.7));

        let b = SettingValue::Bool(true);
        assert_eq!(b.as_bool(), Some(true));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert!(settings.get_bool("log.active").unwrap_or(false));
        assert_eq!(settings.get_string("datafeed.name").as_deref(), Some("binance"));
        assert_eq!(settings.get_float("chart.alpha"), Some(0.7));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);
        fs::write(&path, r#"{"chart.width": 2.0, "datafeed.name": ""}"#).unwrap();

        let settings = Settings::from_file(&path);
        assert_eq!(settings.get_float("chart.width"), Some(2.0));
        assert_eq!(settings.get_string("datafeed.name").as_deref(), Some(""));
        // untouched keys keep their defaults
        assert_eq!(settings.get_int("log.level"), Some(20));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);

        let settings = Settings::with_defaults();
        settings.set("chart.alpha", SettingValue::Float(0.5));
        settings.save_to(&path).unwrap();

        let reloaded = Settings::from_file(&path);
        assert_eq!(reloaded.get_float("chart.alpha"), Some(0.5));
    }

    #[test]
    fn test_malformed_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);
        fs::write(&path, r#"{"chart.width": 2.0,"#).unwrap();

        assert!(load_settings_from_file(&path).is_none());
        let settings = Settings::from_file(&path);
        assert_eq!(settings.get_float("chart.width"), Some(1.0));
    }

    #[test]
    fn test_global_settings_have_defaults() {
        assert!(SETTINGS.get("log.level").is_some());
        assert!(SETTINGS.get("chart.body_ratio").is_some());
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_file(&dir.path().join("absent.json"));
        assert_eq!(settings.get_float("chart.body_ratio"), Some(0.6));
    }
}
