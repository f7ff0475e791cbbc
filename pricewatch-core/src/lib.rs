//! PriceWatch Core — threshold alerting engine for a ticker watchlist.
//!
//! This crate contains the heart of the alerting tool:
//! - Domain types (directions, threshold rules, alerts, snapshots)
//! - Watchlist parsing (target grammar + CSV loader)
//! - Threshold evaluation (price vs. rules → alerts)
//! - Snapshot store (atomic JSON persistence + new-alert diffing)
//! - Quote provider and notifier seams with concrete implementations

pub mod domain;
pub mod evaluate;
pub mod notify;
pub mod quotes;
pub mod snapshot;
pub mod watchlist;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: seam traits and domain types are Send + Sync,
    /// so callers can hold providers behind `Arc` or hand them to threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Direction>();
        require_sync::<domain::Direction>();
        require_send::<domain::ThresholdRule>();
        require_sync::<domain::ThresholdRule>();
        require_send::<domain::Alert>();
        require_sync::<domain::Alert>();
        require_send::<watchlist::Watchlist>();
        require_sync::<watchlist::Watchlist>();

        require_send::<snapshot::SnapshotStore>();
        require_sync::<snapshot::SnapshotStore>();
        require_send::<quotes::YahooQuoteProvider>();
        require_sync::<quotes::YahooQuoteProvider>();
        require_send::<notify::DesktopNotifier>();
        require_sync::<notify::DesktopNotifier>();
    }
}
