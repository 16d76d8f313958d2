//! General utility functions.

use std::env;
use std::fs;
use std::path::PathBuf;
use once_cell::sync::Lazy;

/// Name of the working folder holding settings and logs
pub const TEMP_NAME: &str = ".klinechart";

/// Temp folder under the working directory if present, else under home
fn get_temp_dir(temp_name: &str) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let temp_path = cwd.join(temp_name);

    // If the folder exists in current working directory, use it
    if temp_path.exists() {
        return temp_path;
    }

    // Otherwise use home path
    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let temp_path = home_path.join(temp_name);

    if !temp_path.exists() {
        if let Err(e) = fs::create_dir_all(&temp_path) {
            tracing::warn!("failed to create {}: {}", temp_path.display(), e);
        }
    }

    temp_path
}

/// Temp directory
pub static TEMP_DIR: Lazy<PathBuf> = Lazy::new(|| get_temp_dir(TEMP_NAME));

/// Get path for temp file with filename
pub fn get_file_path(filename: &str) -> PathBuf {
    TEMP_DIR.join(filename)
}

/// Get path for temp folder with folder name, creating it when missing
pub fn get_folder_path(folder_name: &str) -> std::io::Result<PathBuf> {
    let folder_path = TEMP_DIR.join(folder_name);
    if !folder_path.exists() {
        fs::create_dir_all(&folder_path)?;
    }
    Ok(folder_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_under_temp_dir() {
        let path = get_file_path("chart_setting.json");
        assert!(path.starts_with(&*TEMP_DIR));
        assert!(path.ends_with("chart_setting.json"));
    }
}
