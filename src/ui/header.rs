//! Header line rendering

use crate::services::tabs::TabManager;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the one-line header above the tab list
pub struct HeaderRenderer;

impl HeaderRenderer {
    /// Render the tab count plus a hint when focus support is missing
    pub fn render(frame: &mut Frame, area: Rect, manager: &TabManager) {
        let focus_hint = if manager.focus_capable() {
            ""
        } else {
            " (wmctrl unavailable)"
        };
        let header = format!("Tabplexer - {} tab(s){}", manager.tabs().len(), focus_hint);

        let line = Paragraph::new(header).style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(line, area);
    }
}
