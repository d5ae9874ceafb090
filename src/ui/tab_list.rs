//! Tab list rendering

use crate::services::tabs::Tab;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the tab list, one row per tab in creation order
pub struct TabListRenderer;

impl TabListRenderer {
    /// Render all tabs with the selected row reversed
    ///
    /// # Arguments
    /// * `frame` - The ratatui frame to render to
    /// * `area` - The rectangular area to render the list in
    /// * `tabs` - All tracked tabs, in creation order
    /// * `selected` - Index of the selected row
    pub fn render(frame: &mut Frame, area: Rect, tabs: &[Tab], selected: usize) {
        let mut lines = Vec::new();

        for (idx, tab) in tabs.iter().enumerate() {
            let command = tab.command.as_deref().unwrap_or("<shell>");
            let text = format!(
                "[{:02}] {} - {} - {}",
                tab.id.0,
                tab.title,
                status_label(tab.exit_code),
                command
            );

            let style = if idx == selected {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(text, style)));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Status column text, as of the last reconciliation pass.
fn status_label(exit_code: Option<i32>) -> String {
    match exit_code {
        None => "running".to_string(),
        Some(code) => format!("exited ({code})"),
    }
}
