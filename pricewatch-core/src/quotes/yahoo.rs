//! Yahoo Finance quote provider.
//!
//! Reads the regular-market price from Yahoo's v8 chart API metadata.
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes; every parse failure surfaces as ResponseFormatChanged so the
//! caller can tell a format break from a bad symbol.
//!
//! One attempt per call, bounded by the client timeout. Alerting runs are
//! periodic anyway, so a failed lookup just means no alerts for that
//! ticker this round.

use super::provider::{QuoteError, QuoteProvider};
use serde::Deserialize;
use std::time::Duration;

/// Yahoo Finance v8 chart API response, trimmed to the metadata we need.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

/// Yahoo Finance quote provider.
pub struct YahooQuoteProvider {
    client: reqwest::blocking::Client,
}

impl YahooQuoteProvider {
    /// Default per-call timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the chart API URL for a symbol.
    fn chart_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?interval=1d&range=1d"
        )
    }

    /// Extract the regular-market price from a chart response.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<f64, QuoteError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    QuoteError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    QuoteError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                QuoteError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| QuoteError::ResponseFormatChanged("result array is empty".into()))?;

        let price = data
            .meta
            .regular_market_price
            .ok_or_else(|| QuoteError::NoMarketData {
                symbol: symbol.to_string(),
            })?;

        // A halted or delisted symbol can report 0.0 or NaN
        if !price.is_finite() || price <= 0.0 {
            return Err(QuoteError::NoMarketData {
                symbol: symbol.to_string(),
            });
        }

        Ok(price)
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl QuoteProvider for YahooQuoteProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn last_price(&self, ticker: &str) -> Result<f64, QuoteError> {
        let url = Self::chart_url(ticker);

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                QuoteError::Timeout(e.to_string())
            } else if e.is_connect() {
                QuoteError::NetworkUnreachable(e.to_string())
            } else {
                QuoteError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(QuoteError::SymbolNotFound {
                symbol: ticker.to_string(),
            });
        }
        if !status.is_success() {
            return Err(QuoteError::Other(format!("HTTP {status} for {ticker}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            QuoteError::ResponseFormatChanged(format!("failed to parse response for {ticker}: {e}"))
        })?;

        Self::parse_response(ticker, chart)
    }
}
