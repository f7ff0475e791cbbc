//! Desktop notifier — shells out to the platform notification command.
//!
//! macOS: `osascript -e 'display notification ...'`. Elsewhere:
//! `notify-send`. The child process is bounded by a timeout and killed if
//! it overruns, so a hung notification daemon cannot stall the run.

use super::{Notifier, NotifyError};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

const NOTIFICATION_TITLE: &str = "Stock Alert";
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Notification sink backed by the platform's desktop notification command.
pub struct DesktopNotifier {
    timeout: Duration,
}

impl DesktopNotifier {
    /// Default per-notification timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    #[cfg(target_os = "macos")]
    fn command(message: &str) -> Command {
        // osascript takes the message inside a quoted AppleScript string
        let escaped = message.replace('\\', "\\\\").replace('"', "\\\"");
        let script =
            format!("display notification \"{escaped}\" with title \"{NOTIFICATION_TITLE}\"");
        let mut cmd = Command::new("osascript");
        cmd.arg("-e").arg(script);
        cmd
    }

    #[cfg(not(target_os = "macos"))]
    fn command(message: &str) -> Command {
        let mut cmd = Command::new("notify-send");
        cmd.arg(NOTIFICATION_TITLE).arg(message);
        cmd
    }

    /// Poll the child until it exits or the timeout expires, then kill it.
    fn wait_with_timeout(&self, mut child: Child, program: &str) -> Result<(), NotifyError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    return if status.success() {
                        Ok(())
                    } else {
                        Err(NotifyError::CommandFailed {
                            program: program.to_string(),
                            status,
                        })
                    };
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(NotifyError::Timeout {
                            program: program.to_string(),
                            timeout_secs: self.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(NotifyError::Spawn {
                        program: program.to_string(),
                        source,
                    })
                }
            }
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl Notifier for DesktopNotifier {
    fn name(&self) -> &str {
        "desktop"
    }

    fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let mut cmd = Self::command(message);
        let program = cmd.get_program().to_string_lossy().to_string();

        let child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| NotifyError::Spawn {
                program: program.clone(),
                source,
            })?;

        self.wait_with_timeout(child, &program)
    }
}
