//! Threshold rule — the configured (direction, price) pair a ticker is
//! compared against.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the target price fires the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    /// Lowercase name used in alert ids and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Above => "above",
            Direction::Below => "below",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single configured threshold for a ticker.
///
/// `deferred` marks a rule whose alert message carries a "not yet
/// actionable" caution; it does not change when the rule fires.
/// Immutable once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub direction: Direction,
    pub price: f64,
    #[serde(default)]
    pub deferred: bool,
}

impl ThresholdRule {
    pub fn new(direction: Direction, price: f64) -> Self {
        Self {
            direction,
            price,
            deferred: false,
        }
    }

    pub fn deferred(direction: Direction, price: f64) -> Self {
        Self {
            direction,
            price,
            deferred: true,
        }
    }
}
