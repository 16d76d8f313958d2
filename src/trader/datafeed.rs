//! Datafeed module for connecting to different data sources.

use async_trait::async_trait;

use super::object::{BarData, HistoryRequest};
use super::setting::Settings;
use crate::error::{ChartError, Result};
use crate::gateway::binance::BinanceDatafeed;

/// Abstract datafeed trait for connecting to different data sources
#[async_trait]
pub trait BaseDatafeed: Send + Sync {
    /// Initialize datafeed service connection
    async fn init(&self) -> Result<bool> {
        Ok(false)
    }

    /// Query history bar data
    async fn query_bar_history(&self, req: HistoryRequest) -> Result<Vec<BarData>>;
}

/// Empty datafeed implementation for when no datafeed is configured
pub struct EmptyDatafeed;

impl EmptyDatafeed {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmptyDatafeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseDatafeed for EmptyDatafeed {
    async fn init(&self) -> Result<bool> {
        tracing::warn!("no datafeed configured, set datafeed.name in the chart settings");
        Ok(false)
    }

    async fn query_bar_history(&self, req: HistoryRequest) -> Result<Vec<BarData>> {
        Err(ChartError::DatafeedUnavailable(format!(
            "cannot query bars for {}",
            req.vt_symbol()
        )))
    }
}

/// Create the datafeed named by `datafeed.name`
pub fn create_datafeed(settings: &Settings) -> Result<Box<dyn BaseDatafeed>> {
    let name = settings.get_string("datafeed.name").unwrap_or_default();
    match name.as_str() {
        "binance" => Ok(Box::new(BinanceDatafeed::from_settings(settings)?)),
        "" => Ok(Box::new(EmptyDatafeed::new())),
        other => {
            tracing::warn!("unknown datafeed '{}', falling back to empty datafeed", other);
            Ok(Box::new(EmptyDatafeed::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trader::constant::Exchange;
    use crate::trader::setting::SettingValue;
    use chrono::Utc;

    #[tokio::test]
    async fn test_empty_datafeed() {
        let datafeed = EmptyDatafeed::new();

        let result = datafeed.init().await;
        assert!(!result.unwrap());

        let req = HistoryRequest::new("BTCUSDT".to_string(), Exchange::Binance, Utc::now());

        let result = datafeed.query_bar_history(req).await;
        assert!(matches!(result, Err(ChartError::DatafeedUnavailable(_))));
    }

    #[tokio::test]
    async fn test_create_datafeed_without_name() {
        let settings = Settings::with_defaults();
        settings.set("datafeed.name", SettingValue::String(String::new()));

        let datafeed = create_datafeed(&settings).unwrap();
        assert!(!datafeed.init().await.unwrap());
    }

    #[test]
    fn test_unknown_datafeed_falls_back() {
        let settings = Settings::with_defaults();
        settings.set("datafeed.name", SettingValue::String("nowhere".to_string()));

        let datafeed = create_datafeed(&settings).unwrap();
        let req = HistoryRequest::new("BTCUSDT".to_string(), Exchange::Binance, Utc::now());
        let result = tokio_test::block_on(datafeed.query_bar_history(req));
        assert!(matches!(result, Err(ChartError::DatafeedUnavailable(_))));
    }

    #[test]
    fn test_create_binance_datafeed() {
        let settings = Settings::with_defaults();
        assert!(create_datafeed(&settings).is_ok());
    }
}
