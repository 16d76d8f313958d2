//! Binance REST API client for public market data.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::{ChartError, Result};

/// Request timeout applied to every call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST API client for Binance
pub struct BinanceRestClient {
    /// HTTP client
    client: Client,
    /// Base URL
    host: String,
}

impl BinanceRestClient {
    /// Create a new REST client for `host`
    pub fn new(host: &str) -> Result<Self> {
        Self::with_proxy(host, "", 0)
    }

    /// Create a REST client routed through an HTTP proxy when one is configured
    pub fn with_proxy(host: &str, proxy_host: &str, proxy_port: u16) -> Result<Self> {
        let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);

        if !proxy_host.is_empty() && proxy_port > 0 {
            let proxy_url = format!("http://{}:{}", proxy_host, proxy_port);
            builder = builder.proxy(reqwest::Proxy::all(&proxy_url)?);
            tracing::info!("REST client proxy configured: {}:{}", proxy_host, proxy_port);
        }

        Ok(Self {
            client: builder.build()?,
            host: host.trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build request URL with query parameters
    pub fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}{}", self.host, path);
        if params.is_empty() {
            Ok(Url::parse(&base)?)
        } else {
            Ok(Url::parse_with_params(&base, params)?)
        }
    }

    /// Send a GET request and decode the JSON body
    pub async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = self.build_url(path, params)?;

        debug!("Binance API request: GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            if status.as_u16() == 429 {
                warn!("Binance API rate limit hit: {}", text);
            } else {
                error!("Binance API error {}: {}", status, text);
            }
            return Err(ChartError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
