//! Error type shared by the datafeed, chart and display layers.

use thiserror::Error;

/// Top-level error for chart operations.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed kline row {index}: {reason}")]
    MalformedBar { index: usize, reason: String },

    #[error("datafeed not configured: {0}")]
    DatafeedUnavailable(String),

    #[error("invalid indicator parameter {name}={value}")]
    InvalidParameter { name: &'static str, value: usize },

    #[error("display failed: {0}")]
    Display(String),

    #[error("logger setup failed: {0}")]
    Logger(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;
