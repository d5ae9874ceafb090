//! Help page rendering and management

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Key reference shown on the help page.
const BINDINGS: &[(&str, &str)] = &[
    ("Up/k, Down/j", "Move selection"),
    ("Enter", "Focus selected tab (requires wmctrl)"),
    ("n", "Create a new tab"),
    ("r", "Rename selected tab"),
    ("c", "Close selected tab"),
    ("x", "Remove exited tabs from the list"),
    ("q, Esc", "Quit Tabplexer (running tabs stay alive)"),
];

/// Manages help page state and rendering
pub struct HelpRenderer {
    /// Is help visible?
    visible: bool,
}

impl HelpRenderer {
    pub fn new() -> Self {
        Self { visible: false }
    }

    /// Toggle help page visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Check if help page is visible
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Render the help page over the whole area
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![];

        lines.push(Line::from(vec![Span::styled(
            " CONTROLS ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(""));

        let max_key_width = BINDINGS.iter().map(|(key, _)| key.len()).max().unwrap_or(16);
        for (key, action) in BINDINGS {
            lines.push(Line::from(format!("  {key:<max_key_width$}  {action}")));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(
            "  When creating a tab you can leave fields blank to accept defaults.",
        ));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(
            " Press any key to return ",
            Style::default().add_modifier(Modifier::REVERSED),
        )]));

        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Help ")
                .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(help, area);
    }
}

impl Default for HelpRenderer {
    fn default() -> Self {
        Self::new()
    }
}
