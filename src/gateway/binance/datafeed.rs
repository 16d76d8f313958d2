//! History bar download from the Binance klines endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::constants::{GATEWAY_NAME, INTERVAL_VT2BINANCE, KLINES_LIMIT, KLINES_PATH, SPOT_REST_HOST};
use super::rest_client::BinanceRestClient;
use crate::error::{ChartError, Result};
use crate::trader::datafeed::BaseDatafeed;
use crate::trader::object::{BarData, HistoryRequest};
use crate::trader::setting::Settings;
use crate::trader::{Exchange, Interval};

/// Datafeed backed by Binance spot klines
pub struct BinanceDatafeed {
    rest_client: BinanceRestClient,
}

impl BinanceDatafeed {
    /// Create a datafeed talking to `host`
    pub fn new(host: &str) -> Result<Self> {
        Ok(Self {
            rest_client: BinanceRestClient::new(host)?,
        })
    }

    /// Create a datafeed from `datafeed.*` settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let host = settings
            .get_string("datafeed.host")
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| SPOT_REST_HOST.to_string());
        let proxy_host = settings.get_string("datafeed.proxy_host").unwrap_or_default();
        let proxy_port = settings
            .get_int("datafeed.proxy_port")
            .and_then(|p| u16::try_from(p).ok())
            .unwrap_or(0);

        Ok(Self {
            rest_client: BinanceRestClient::with_proxy(&host, &proxy_host, proxy_port)?,
        })
    }
}

#[async_trait]
impl BaseDatafeed for BinanceDatafeed {
    async fn init(&self) -> Result<bool> {
        self.rest_client.get("/api/v3/ping", &[]).await?;
        tracing::info!("Binance datafeed connected: {}", self.rest_client.host());
        Ok(true)
    }

    async fn query_bar_history(&self, req: HistoryRequest) -> Result<Vec<BarData>> {
        let mut history = Vec::new();
        let interval = req.interval.unwrap_or(Interval::Daily);
        let interval_str = INTERVAL_VT2BINANCE.get(&interval).copied().unwrap_or("1d");
        let interval_ms = interval.seconds() * 1000;
        let mut start_time = req.start.timestamp_millis();

        loop {
            let mut params = vec![
                ("symbol", req.symbol.to_uppercase()),
                ("interval", interval_str.to_string()),
                ("limit", KLINES_LIMIT.to_string()),
                ("startTime", start_time.to_string()),
            ];
            if let Some(end) = req.end {
                params.push(("endTime", end.timestamp_millis().to_string()));
            }

            let data = self.rest_client.get(KLINES_PATH, &params).await?;
            let bars = parse_klines(&req.symbol, interval, &data)?;
            let received = bars.len();

            let Some(last) = bars.last() else { break };
            start_time = last.datetime.timestamp_millis() + interval_ms;
            history.extend(bars);

            if received < KLINES_LIMIT {
                break;
            }
        }

        tracing::info!("fetched {} bars for {}", history.len(), req.vt_symbol());
        Ok(history)
    }
}

/// Parse a klines response body into bars
pub fn parse_klines(symbol: &str, interval: Interval, data: &Value) -> Result<Vec<BarData>> {
    let rows = data.as_array().ok_or_else(|| ChartError::MalformedBar {
        index: 0,
        reason: "response is not an array".to_string(),
    })?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| parse_kline_row(symbol, interval, index, row))
        .collect()
}

fn parse_kline_row(symbol: &str, interval: Interval, index: usize, row: &Value) -> Result<BarData> {
    let malformed = |reason: String| ChartError::MalformedBar { index, reason };

    let arr = row
        .as_array()
        .ok_or_else(|| malformed("row is not an array".to_string()))?;
    if arr.len() < 8 {
        return Err(malformed(format!("expected at least 8 fields, got {}", arr.len())));
    }

    let open_time = arr[0]
        .as_i64()
        .ok_or_else(|| malformed("open time is not an integer".to_string()))?;
    let datetime = DateTime::<Utc>::from_timestamp_millis(open_time)
        .ok_or_else(|| malformed(format!("open time {} out of range", open_time)))?;

    let field = |ix: usize, name: &str| -> Result<f64> {
        arr[ix]
            .as_str()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| malformed(format!("{} is not a decimal string", name)))
    };

    Ok(BarData {
        gateway_name: GATEWAY_NAME.to_string(),
        symbol: symbol.to_string(),
        exchange: Exchange::Binance,
        datetime,
        interval: Some(interval),
        open_price: field(1, "open")?,
        high_price: field(2, "high")?,
        low_price: field(3, "low")?,
        close_price: field(4, "close")?,
        volume: field(5, "volume")?,
        turnover: field(7, "quote volume")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn kline(open_time: i64, open: &str, high: &str, low: &str, close: &str) -> Value {
        json!([
            open_time, open, high, low, close, "12.5", open_time + 86_399_999, "1500.0",
            42, "6.0", "700.0", "0"
        ])
    }

    #[test]
    fn test_parse_klines() {
        let day = Utc.with_ymd_and_hms(2024, 9, 2, 0, 0, 0).unwrap();
        let data = json!([
            kline(day.timestamp_millis(), "10.0", "13.0", "9.0", "12.0"),
            kline(day.timestamp_millis() + 86_400_000, "12.0", "12.5", "10.5", "11.0"),
        ]);

        let bars = parse_klines("BTCUSDT", Interval::Daily, &data).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].datetime, day);
        assert_eq!(bars[0].open_price, 10.0);
        assert_eq!(bars[0].high_price, 13.0);
        assert_eq!(bars[0].low_price, 9.0);
        assert_eq!(bars[0].close_price, 12.0);
        assert_eq!(bars[0].volume, 12.5);
        assert_eq!(bars[0].turnover, 1500.0);
        assert_eq!(bars[1].datetime.format("%Y-%m-%d").to_string(), "2024-09-03");
        assert_eq!(bars[1].vt_symbol(), "BTCUSDT.BINANCE");
    }

    #[test]
    fn test_parse_empty_response() {
        let bars = parse_klines("BTCUSDT", Interval::Daily, &json!([])).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_klines("BTCUSDT", Interval::Daily, &json!({"code": -1121})).unwrap_err();
        assert!(matches!(err, ChartError::MalformedBar { index: 0, .. }));
    }

    #[test]
    fn test_parse_reports_bad_row() {
        let data = json!([
            kline(1_725_235_200_000, "10.0", "13.0", "9.0", "12.0"),
            kline(1_725_321_600_000, "12.0", "oops", "10.5", "11.0"),
        ]);
        let err = parse_klines("BTCUSDT", Interval::Daily, &data).unwrap_err();
        assert!(matches!(err, ChartError::MalformedBar { index: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_short_row() {
        let data = json!([[1_725_235_200_000_i64, "1", "2"]]);
        assert!(parse_klines("BTCUSDT", Interval::Daily, &data).is_err());
    }

    #[test]
    fn test_from_settings_uses_default_host() {
        let settings = Settings::with_defaults();
        settings.set(
            "datafeed.host",
            crate::trader::setting::SettingValue::String(String::new()),
        );
        let datafeed = BinanceDatafeed::from_settings(&settings).unwrap();
        assert_eq!(datafeed.rest_client.host(), SPOT_REST_HOST);
    }
}
