//! Status bar and prompt line rendering

use crate::app::Prompt;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Renders the status bar or the active prompt
pub struct StatusBarRenderer;

impl StatusBarRenderer {
    /// Render the status bar, or the prompt line when a prompt is active
    ///
    /// # Arguments
    /// * `frame` - The ratatui frame to render to
    /// * `area` - The rectangular area to render in
    /// * `status_message` - Last operation's outcome message
    /// * `prompt` - Optional active prompt
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        status_message: &Option<String>,
        prompt: &Option<Prompt>,
    ) {
        if let Some(prompt) = prompt {
            Self::render_prompt(frame, area, prompt);
            return;
        }

        let message = status_message.as_deref().unwrap_or("");
        let status_line =
            Paragraph::new(message).style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(status_line, area);
    }

    /// Render the prompt line with its cursor
    fn render_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
        let prompt_text = format!("{}{}", prompt.message, prompt.input);
        let prompt_line = Paragraph::new(prompt_text);
        frame.render_widget(prompt_line, area);

        let cursor_x = (prompt.message.chars().count() + prompt.cursor_pos) as u16;
        if cursor_x < area.width {
            frame.set_cursor_position((area.x + cursor_x, area.y));
        }
    }
}
