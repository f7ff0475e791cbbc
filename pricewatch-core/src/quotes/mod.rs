//! Quote providers — last-price lookup for watchlist tickers.

mod provider;
mod yahoo;

pub use provider::{QuoteError, QuoteProvider};
pub use yahoo::YahooQuoteProvider;
