//! Domain types — directions, threshold rules, alerts, snapshots.

mod alert;
mod rule;

pub use alert::{alert_id, Alert, AlertSnapshot};
pub use rule::{Direction, ThresholdRule};
