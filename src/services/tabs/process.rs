//! Exclusive ownership of one spawned emulator process.
//!
//! Every tab owns exactly one `ProcessHandle`; nothing else signals or
//! waits on the underlying child. The capability surface is deliberately
//! narrow: poll, graceful stop, forced stop, bounded wait.

use std::process::{Child, ExitStatus};
use std::time::{Duration, Instant};

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// How often a bounded wait re-polls the child.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Owned handle to a spawned emulator process.
pub struct ProcessHandle {
    child: Child,
}

impl ProcessHandle {
    pub fn new(child: Child) -> Self {
        Self { child }
    }

    /// OS process id of the child.
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Whether the process has not yet been observed as exited.
    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Non-blocking poll; `Some` once the process has terminated.
    ///
    /// `Child` caches the status after the first successful wait, so this
    /// keeps reporting the same code on every later call.
    pub fn poll_exit_status(&mut self) -> Option<i32> {
        match self.child.try_wait() {
            Ok(Some(status)) => Some(exit_code(status)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to poll process {}: {}", self.child.id(), e);
                None
            }
        }
    }

    /// Ask the process to terminate (SIGTERM).
    pub fn request_graceful_stop(&mut self) {
        let pid = Pid::from_raw(self.child.id() as i32);
        if let Err(e) = signal::kill(pid, Signal::SIGTERM) {
            tracing::warn!("Failed to send SIGTERM to {}: {}", pid, e);
        }
    }

    /// Kill the process outright (SIGKILL).
    pub fn force_stop(&mut self) {
        if let Err(e) = self.child.kill() {
            tracing::warn!("Failed to kill process {}: {}", self.child.id(), e);
        }
    }

    /// Block until the process exits or `bound` elapses.
    ///
    /// Returns true when an exit was observed within the bound.
    pub fn wait_timeout(&mut self, bound: Duration) -> bool {
        let deadline = Instant::now() + bound;
        loop {
            match self.child.try_wait() {
                Ok(Some(_)) => return true,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Failed to wait on process {}: {}", self.child.id(), e);
                    return false;
                }
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(WAIT_POLL_INTERVAL);
        }
    }
}

/// Map an `ExitStatus` to the integer the front-end displays: the exit
/// code, or the negated signal number when the process died to a signal.
fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return -sig;
        }
    }
    status.code().unwrap_or(-1)
}
