//! Check runner — wires together watchlist, quotes, evaluation, snapshot
//! diffing, and notification for one end-to-end pass.
//!
//! Failure policy: a quote failure degrades that ticker to zero alerts, a
//! notification failure is recorded and the alert persists anyway
//! (at-most-once notify attempt), and only snapshot persistence failures
//! abort the run.

use chrono::Utc;
use thiserror::Error;

use pricewatch_core::domain::{Alert, AlertSnapshot};
use pricewatch_core::evaluate::evaluate;
use pricewatch_core::notify::Notifier;
use pricewatch_core::quotes::QuoteProvider;
use pricewatch_core::snapshot::{diff_new, SnapshotStore, StoreError};
use pricewatch_core::watchlist::Watchlist;

/// Fatal errors from the runner. Per-ticker and per-alert failures are not
/// errors; they are recorded in the [`RunReport`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error("snapshot store error: {0}")]
    Store(#[from] StoreError),
}

/// A quote lookup that failed; the ticker contributed no alerts this run.
#[derive(Debug, Clone)]
pub struct QuoteFailure {
    pub ticker: String,
    pub reason: String,
}

/// A notification attempt that failed; the alert is persisted regardless.
#[derive(Debug, Clone)]
pub struct NotifyFailure {
    pub alert_id: String,
    pub reason: String,
}

/// Outcome of one check run, for the caller to print.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Alerts firing now that were absent from the previous snapshot.
    pub new_alerts: Vec<Alert>,
    /// Size of the current snapshot (new and previously-seen alerts).
    pub active_alerts: usize,
    pub quote_failures: Vec<QuoteFailure>,
    pub notify_failures: Vec<NotifyFailure>,
}

impl RunReport {
    /// True when the current snapshot is empty.
    pub fn nothing_active(&self) -> bool {
        self.active_alerts == 0
    }
}

/// Drive one end-to-end pass over the watchlist.
///
/// The current snapshot is saved unconditionally at the end, even when
/// empty and even when nothing new fired. That overwrite is what makes
/// alerts fire once across runs.
pub fn run_check(
    watchlist: &Watchlist,
    provider: &dyn QuoteProvider,
    notifier: &dyn Notifier,
    store: &SnapshotStore,
) -> Result<RunReport, RunError> {
    let now = Utc::now();

    let mut current = AlertSnapshot::new();
    let mut quote_failures = Vec::new();

    for entry in watchlist.entries() {
        let price = match provider.last_price(&entry.ticker) {
            Ok(price) => Some(price),
            Err(e) => {
                quote_failures.push(QuoteFailure {
                    ticker: entry.ticker.clone(),
                    reason: e.to_string(),
                });
                None
            }
        };

        for alert in evaluate(&entry.ticker, price, &entry.rules, now) {
            // Rules that collide on identity collapse; last write wins.
            current.insert(alert.id.clone(), alert);
        }
    }

    let previous = store.load()?;
    let new_alerts = diff_new(&current, &previous);

    let mut notify_failures = Vec::new();
    for alert in &new_alerts {
        if let Err(e) = notifier.notify(&alert.message) {
            notify_failures.push(NotifyFailure {
                alert_id: alert.id.clone(),
                reason: e.to_string(),
            });
        }
    }

    store.save(&current)?;

    Ok(RunReport {
        new_alerts,
        active_alerts: current.len(),
        quote_failures,
        notify_failures,
    })
}
