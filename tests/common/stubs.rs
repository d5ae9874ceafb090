//! Stub tool binaries for driving the tab manager without a real
//! emulator or window manager installed.
//!
//! Each stub is a tiny `sh` script written into the test's temp
//! directory; `TabManager::with_tools` points the manager at them.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Write an executable `sh` script into `dir` and return its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write stub script");
    let mut perms = fs::metadata(&path)
        .expect("stat stub script")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod stub script");
    path
}

/// Emulator stub that records its argv (one line per argument) and then
/// stays alive until signalled.
pub fn recording_emulator(dir: &Path) -> (PathBuf, PathBuf) {
    let log = dir.join("argv.log");
    let body = format!(
        "for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{}'; done\nexec sleep 30\n",
        log.display()
    );
    (write_script(dir, "emulator", &body), log)
}

/// Emulator stub that stays alive until signalled.
pub fn sleeping_emulator(dir: &Path) -> PathBuf {
    write_script(dir, "emulator", "exec sleep 30\n")
}

/// Emulator stub that exits immediately with the given code.
pub fn short_lived_emulator(dir: &Path, code: i32) -> PathBuf {
    write_script(dir, "emulator", &format!("exit {code}\n"))
}

/// Emulator stub that ignores the graceful stop request.
pub fn stubborn_emulator(dir: &Path) -> PathBuf {
    write_script(dir, "emulator", "trap '' TERM\nwhile :; do sleep 0.05; done\n")
}

/// Focus helper stub that records its argv.
pub fn recording_focus_helper(dir: &Path) -> (PathBuf, PathBuf) {
    let log = dir.join("focus.log");
    let body = format!(
        "for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{}'; done\n",
        log.display()
    );
    (write_script(dir, "focus-helper", &body), log)
}

/// Poll `cond` every few milliseconds until it holds or `bound` elapses.
pub fn wait_until(bound: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + bound;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    cond()
}
