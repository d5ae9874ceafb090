//! Tab lifecycle service
//!
//! Launches, tracks, focuses and stops external emulator windows
//! ("tabs"). Each tab is an independently windowed OS process; this
//! service owns the process handles and nothing else signals them.
//!
//! - `manager` owns the tab collection and the lifecycle operations
//! - `process` wraps each spawned child behind a narrow capability surface

mod manager;
mod process;

pub use manager::{Tab, TabError, TabId, TabManager};
