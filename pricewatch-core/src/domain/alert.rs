//! Alert — one fired threshold crossing, plus the snapshot map persisted
//! between runs.

use super::rule::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All alerts that fired in one run, keyed by [`Alert::id`].
///
/// Fully overwritten each run — an alert absent from the current run's
/// snapshot is implicitly no longer active. Two rules with identical
/// (ticker, direction, price) collapse into one entry by construction.
pub type AlertSnapshot = BTreeMap<String, Alert>;

/// Stable identity for a threshold crossing: `{ticker}_{direction}_{target}`.
///
/// The id is a function of the configured target, never of the observed
/// price or timestamp, so the same logical crossing produces the same id
/// across runs. The target is rendered with `{:?}` so `150.0` stays
/// `150.0` and `20.5` stays `20.5`, matching persisted ids from earlier
/// versions of the tool.
pub fn alert_id(ticker: &str, direction: Direction, target_price: f64) -> String {
    format!("{ticker}_{direction}_{target_price:?}")
}

/// A fired alert, created by the evaluator and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub ticker: String,
    pub direction: Direction,
    pub target_price: f64,
    pub current_price: f64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_renders_whole_targets_with_trailing_zero() {
        assert_eq!(alert_id("AAPL", Direction::Above, 150.0), "AAPL_above_150.0");
    }

    #[test]
    fn id_renders_fractional_targets_verbatim() {
        assert_eq!(alert_id("TSLA", Direction::Below, 20.5), "TSLA_below_20.5");
    }

    #[test]
    fn id_ignores_observed_price() {
        // Same rule, different market conditions — identical identity.
        let a = alert_id("SPY", Direction::Above, 500.0);
        let b = alert_id("SPY", Direction::Above, 500.0);
        assert_eq!(a, b);
    }
}
