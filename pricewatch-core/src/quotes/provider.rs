//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over price sources so we can swap
//! implementations and mock for tests. The run orchestrator treats every
//! QuoteError the same way: price absent for that ticker, run continues.

use thiserror::Error;

/// Structured error types for quote lookups.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("no market data for {symbol}")]
    NoMarketData { symbol: String },

    #[error("quote error: {0}")]
    Other(String),
}

/// Trait for price sources (Yahoo Finance, mocks in tests).
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the last traded price for a ticker.
    ///
    /// One bounded attempt; callers decide what an error means. No retry
    /// is performed at this layer.
    fn last_price(&self, ticker: &str) -> Result<f64, QuoteError>;
}
