//! Notifier sink — best-effort delivery of alert messages to the user.
//!
//! Notification failure is never fatal: the run still persists its
//! snapshot, so a missed notification is not re-attempted on the next run
//! (at-most-once notify attempt by design).

mod desktop;

pub use desktop::DesktopNotifier;

use thiserror::Error;

/// Structured error types for notification delivery.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    CommandFailed {
        program: String,
        status: std::process::ExitStatus,
    },

    #[error("{program} did not finish within {timeout_secs}s")]
    Timeout { program: String, timeout_secs: u64 },
}

/// Trait for notification sinks (desktop notifications, no-op, test doubles).
pub trait Notifier: Send + Sync {
    /// Human-readable name of this sink.
    fn name(&self) -> &str;

    /// Deliver one message. One bounded attempt, no retry.
    fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// Notifier that drops every message. Used for headless runs where the
/// console output is the only announcement.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn name(&self) -> &str {
        "none"
    }

    fn notify(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
