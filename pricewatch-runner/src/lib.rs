//! PriceWatch Runner — run configuration and the single-pass check
//! orchestrator.
//!
//! One entry point: [`run_check()`] drives watchlist → quote provider →
//! evaluator → snapshot diff → notifier → snapshot save and returns a
//! [`RunReport`] for the caller to print.

pub mod config;
pub mod runner;

pub use config::{ConfigError, NotifierKind, RunConfig};
pub use runner::{run_check, NotifyFailure, QuoteFailure, RunError, RunReport};
