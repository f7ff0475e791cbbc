//! Snapshot store — JSON persistence of the most recent alert set.
//!
//! The snapshot is what makes alerts fire once: the previous run's alert
//! ids suppress re-notification, and the current set overwrites the file
//! unconditionally at the end of every run. Writes are atomic (write to
//! .tmp, rename into place) so a crash mid-save never leaves a file that
//! mixes old and new entries.

use crate::domain::{Alert, AlertSnapshot};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Structured error types for snapshot persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// File-backed store for the previous run's [`AlertSnapshot`].
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previous snapshot. A missing file is an empty snapshot,
    /// not an error; an unreadable or corrupt file is.
    pub fn load(&self) -> Result<AlertSnapshot, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AlertSnapshot::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the persisted snapshot with `snapshot`.
    ///
    /// Writes to a sibling .tmp file and renames it into place; the temp
    /// file is removed if the rename fails.
    pub fn save(&self, snapshot: &AlertSnapshot) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(write_err)?;

        fs::rename(&tmp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            StoreError::Write {
                path: self.path.clone(),
                source,
            }
        })
    }
}

/// Entries of `current` whose id is absent from `previous`, in `current`'s
/// iteration order.
///
/// This is single-run memory, not hysteresis: an id that stops firing for
/// one run drops out of the snapshot, so a later re-crossing notifies
/// again.
pub fn diff_new(current: &AlertSnapshot, previous: &AlertSnapshot) -> Vec<Alert> {
    current
        .values()
        .filter(|alert| !previous.contains_key(&alert.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{alert_id, Direction};
    use chrono::Utc;
    use tempfile::TempDir;

    fn make_alert(ticker: &str, direction: Direction, target: f64, price: f64) -> Alert {
        Alert {
            id: alert_id(ticker, direction, target),
            ticker: ticker.to_string(),
            direction,
            target_price: target,
            current_price: price,
            message: format!("{ticker} is {direction} ${target:.2} (current: ${price:.2})"),
            timestamp: Utc::now(),
        }
    }

    fn snapshot_of(alerts: Vec<Alert>) -> AlertSnapshot {
        alerts.into_iter().map(|a| (a.id.clone(), a)).collect()
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path().join("previous_alerts.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path().join("previous_alerts.json"));

        let snapshot = snapshot_of(vec![
            make_alert("AAPL", Direction::Above, 150.0, 160.0),
            make_alert("TSLA", Direction::Below, 180.0, 175.5),
        ]);

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path().join("previous_alerts.json"));

        let first = snapshot_of(vec![make_alert("AAPL", Direction::Above, 150.0, 160.0)]);
        store.save(&first).unwrap();

        let second = snapshot_of(vec![make_alert("TSLA", Direction::Below, 180.0, 175.5)]);
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, second);
        assert!(!loaded.contains_key("AAPL_above_150.0"));
    }

    #[test]
    fn save_empty_snapshot_clears_state() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path().join("previous_alerts.json"));

        store
            .save(&snapshot_of(vec![make_alert("AAPL", Direction::Above, 150.0, 160.0)]))
            .unwrap();
        store.save(&AlertSnapshot::new()).unwrap();

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let store = SnapshotStore::new(tmp.path().join("state/nested/previous_alerts.json"));
        store.save(&AlertSnapshot::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("previous_alerts.json");
        let store = SnapshotStore::new(&path);
        store
            .save(&snapshot_of(vec![make_alert("AAPL", Direction::Above, 150.0, 160.0)]))
            .unwrap();
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_snapshot_is_an_error_not_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("previous_alerts.json");
        fs::write(&path, "{ not json").unwrap();
        let store = SnapshotStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn diff_new_returns_only_unseen_ids() {
        let previous = snapshot_of(vec![make_alert("AAPL", Direction::Above, 150.0, 155.0)]);
        let current = snapshot_of(vec![
            make_alert("AAPL", Direction::Above, 150.0, 160.0),
            make_alert("TSLA", Direction::Below, 180.0, 175.5),
        ]);

        let new_alerts = diff_new(&current, &previous);
        assert_eq!(new_alerts.len(), 1);
        assert_eq!(new_alerts[0].id, "TSLA_below_180.0");
    }

    #[test]
    fn diff_new_against_empty_previous_returns_everything() {
        let current = snapshot_of(vec![
            make_alert("AAPL", Direction::Above, 150.0, 160.0),
            make_alert("TSLA", Direction::Below, 180.0, 175.5),
        ]);
        assert_eq!(diff_new(&current, &AlertSnapshot::new()).len(), 2);
    }

    #[test]
    fn alert_absent_from_current_is_simply_gone() {
        // Single-run memory: once a rule stops firing its id leaves the
        // snapshot, so nothing needs explicit clearing.
        let previous = snapshot_of(vec![make_alert("AAPL", Direction::Above, 150.0, 155.0)]);
        let current = AlertSnapshot::new();
        assert!(diff_new(&current, &previous).is_empty());
    }
}
