//! Tab Manager - launches and keeps track of emulator windows
//!
//! This module provides the lifecycle manager for emulator tabs:
//! - Spawns one emulator process per tab, tagged for later focus lookup
//! - Assigns stable identifiers that are never reused
//! - Reconciles liveness and captures exit codes exactly once
//! - Terminates tabs gracefully, escalating to a forced kill
//!
//! No UI logic lives here, so the manager can be reused from other
//! front-ends.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;

use chrono::{DateTime, Local};
use thiserror::Error;

use super::process::ProcessHandle;

/// Shared window class, so window managers can group all tabs together.
const APP_CLASS: &str = "Tabplexer";

/// Executables looked up on `PATH` at construction time.
const EMULATOR_BIN: &str = "alacritty";
const FOCUS_HELPER_BIN: &str = "wmctrl";

/// Default bound for each stage of the graceful/forced termination wait.
const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// Errors surfaced by tab lifecycle operations.
#[derive(Debug, Error)]
pub enum TabError {
    /// The emulator binary is missing from `PATH`; no tab can ever spawn.
    #[error("unable to find the 'alacritty' executable in PATH")]
    EmulatorNotFound,
    /// One spawn attempt failed; no tab was recorded.
    #[error("failed to spawn emulator: {0}")]
    SpawnFailed(#[source] io::Error),
}

/// Unique identifier for a tab, never reused for the manager's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(pub u64);

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tab-{}", self.0)
    }
}

/// A running (or previously running) emulator window managed by the
/// tab manager.
pub struct Tab {
    /// Stable identity; allocated in increasing order, never reused.
    pub id: TabId,
    /// Display label; renameable from the front-end.
    pub title: String,
    /// One-shot command the tab was created with; `None` means the
    /// emulator launched its default interactive shell.
    pub command: Option<String>,
    /// Directory the process was started in.
    pub cwd: PathBuf,
    /// Window-matching key handed to the focus helper.
    pub instance_class: String,
    /// When the process was spawned.
    pub created_at: DateTime<Local>,
    /// Captured exit status; `None` until the first reconciliation that
    /// observes the process gone, final afterwards.
    pub exit_code: Option<i32>,
    process: ProcessHandle,
}

impl Tab {
    /// OS process id behind this tab.
    pub fn pid(&self) -> u32 {
        self.process.pid()
    }

    fn refresh(&mut self) {
        if self.exit_code.is_none() {
            if let Some(code) = self.process.poll_exit_status() {
                tracing::info!("{} exited with status {}", self.id, code);
                self.exit_code = Some(code);
            }
        }
    }

    /// Graceful-then-forced termination. Does not touch `exit_code`; the
    /// next reconciliation pass captures it.
    fn terminate(&mut self, grace: Duration) {
        if !self.process.is_alive() {
            return;
        }
        tracing::info!("Stopping {} (pid {})", self.id, self.process.pid());
        self.process.request_graceful_stop();
        if self.process.wait_timeout(grace) {
            return;
        }
        tracing::warn!("{} ignored the stop request, killing", self.id);
        self.process.force_stop();
        if !self.process.wait_timeout(grace) {
            // Even a kill is not instantaneous; the next refresh cycle
            // picks the exit up.
            tracing::warn!("{} still not reaped after kill", self.id);
        }
    }
}

/// Launches and keeps track of emulator windows.
pub struct TabManager {
    tabs: Vec<Tab>,
    next_id: u64,
    emulator_path: PathBuf,
    focus_helper_path: Option<PathBuf>,
    grace_period: Duration,
}

impl TabManager {
    /// Locate the external tools on `PATH` and build an empty manager.
    ///
    /// The emulator is mandatory. The focus helper is optional; its
    /// absence merely disables `focus`.
    pub fn new() -> Result<Self, TabError> {
        let emulator = which::which(EMULATOR_BIN).map_err(|_| TabError::EmulatorNotFound)?;
        let focus_helper = which::which(FOCUS_HELPER_BIN).ok();
        Ok(Self::with_tools(emulator, focus_helper))
    }

    /// Build a manager around explicit tool paths.
    ///
    /// Injection point for tests and for embedders targeting a different
    /// emulator binary.
    pub fn with_tools(emulator: PathBuf, focus_helper: Option<PathBuf>) -> Self {
        Self {
            tabs: Vec::new(),
            next_id: 1,
            emulator_path: emulator,
            focus_helper_path: focus_helper,
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// All tracked tabs, in creation order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn get(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    fn get_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    /// Whether a focus helper was found at construction time.
    pub fn focus_capable(&self) -> bool {
        self.focus_helper_path.is_some()
    }

    /// Override the per-stage termination wait bound.
    pub fn set_grace_period(&mut self, grace: Duration) {
        self.grace_period = grace;
    }

    /// Spawn a new emulator window and start tracking it.
    ///
    /// The window is tagged with an instance class derived from the new
    /// id so the focus helper can find it later. A `command` runs through
    /// the user's shell; without one the emulator starts its default
    /// interactive shell. `cwd` defaults to the current directory.
    pub fn create(
        &mut self,
        title: Option<&str>,
        command: Option<&str>,
        cwd: Option<PathBuf>,
    ) -> Result<TabId, TabError> {
        let id = TabId(self.next_id);
        self.next_id += 1;

        let cwd = match cwd {
            Some(dir) => dir,
            None => std::env::current_dir().map_err(TabError::SpawnFailed)?,
        };
        let instance_class = instance_class_for(id);

        let mut cmd = Command::new(&self.emulator_path);
        cmd.arg("--class")
            .arg(format!("{instance_class},{APP_CLASS}"))
            .current_dir(&cwd);
        if let Some(title) = title {
            cmd.arg("--title").arg(title);
        }
        if let Some(command) = command {
            // Run the command through the user's shell for convenience.
            cmd.arg("-e").arg(configured_shell()).arg("-lc").arg(command);
        }

        let child = cmd.spawn().map_err(TabError::SpawnFailed)?;
        tracing::info!("Spawned {} (pid {}) in {}", id, child.id(), cwd.display());

        self.tabs.push(Tab {
            id,
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| format!("Tab {}", id.0)),
            command: command.map(str::to_string),
            cwd,
            instance_class,
            created_at: Local::now(),
            exit_code: None,
            process: ProcessHandle::new(child),
        });
        Ok(id)
    }

    /// Terminate the process behind `id`, escalating from graceful to
    /// forced. Idempotent; already-exited tabs are left untouched.
    ///
    /// The exit code is captured by the next `refresh`, never here.
    pub fn close(&mut self, id: TabId) {
        let grace = self.grace_period;
        if let Some(tab) = self.get_mut(id) {
            tab.terminate(grace);
        }
    }

    /// Observe process exits, capturing each exit status exactly once.
    pub fn refresh(&mut self) {
        for tab in &mut self.tabs {
            tab.refresh();
        }
    }

    /// Drop every tab that has exited and had its exit acknowledged by
    /// `refresh`. Returns how many tabs were removed.
    ///
    /// A tab whose process died but has not been reconciled yet stays in
    /// the list, so its exit status is never silently lost.
    pub fn prune(&mut self) -> usize {
        let before = self.tabs.len();
        self.tabs
            .retain_mut(|tab| tab.process.is_alive() || tab.exit_code.is_none());
        let removed = before - self.tabs.len();
        if removed > 0 {
            tracing::info!("Pruned {} exited tab(s)", removed);
        }
        removed
    }

    /// Terminate every tracked tab with the same escalation policy as
    /// `close`. Tabs stay in the list; removal remains `prune`'s job.
    pub fn shutdown(&mut self) {
        let grace = self.grace_period;
        for tab in &mut self.tabs {
            tab.terminate(grace);
        }
    }

    /// Ask the window manager to raise the window behind `id`.
    ///
    /// Returns true when a focus request was dispatched to the helper;
    /// the window manager may still ignore it. Returns false when the
    /// helper is unavailable, the tab is not running, or the helper
    /// failed to launch.
    pub fn focus(&mut self, id: TabId) -> bool {
        let Some(helper) = self.focus_helper_path.clone() else {
            return false;
        };
        let Some(tab) = self.get_mut(id) else {
            return false;
        };
        if !tab.process.is_alive() {
            return false;
        }
        let result = Command::new(&helper)
            .arg("-x")
            .arg("-a")
            .arg(&tab.instance_class)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Failed to run focus helper for {}: {}", tab.id, e);
                false
            }
        }
    }

    /// Relabel a tab. The front-end rejects empty titles before calling.
    pub fn rename(&mut self, id: TabId, new_title: impl Into<String>) {
        if let Some(tab) = self.get_mut(id) {
            tab.title = new_title.into();
        }
    }
}

/// Window-matching key for a tab id.
fn instance_class_for(id: TabId) -> String {
    format!("TabplexerTab{}", id.0)
}

/// Shell used to interpret one-shot tab commands.
fn configured_shell() -> String {
    match std::env::var("SHELL") {
        Ok(shell) if !shell.is_empty() => shell,
        _ => "bash".to_string(),
    }
}
