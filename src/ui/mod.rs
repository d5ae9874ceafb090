//! UI rendering components

pub mod header;
pub mod help;
pub mod status_bar;
pub mod tab_list;

pub use header::HeaderRenderer;
pub use help::HelpRenderer;
pub use status_bar::StatusBarRenderer;
pub use tab_list::TabListRenderer;
