//! Interactive shell over the tab manager
//!
//! The shell drives the manager from a single synchronous loop: one
//! reconciliation pass, one render, one input event, at most one manager
//! operation per cycle. All tab state lives in the manager; the shell
//! only keeps presentation state (selection, prompt, status message).

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::{DefaultTerminal, Frame};

use crate::services::tabs::{TabId, TabManager};
use crate::ui::{HeaderRenderer, HelpRenderer, StatusBarRenderer, TabListRenderer};

/// Which input the prompt line is collecting.
enum PromptKind {
    CreateTitle,
    CreateCommand { title: Option<String> },
    Rename { id: TabId },
}

/// Line-input state for the prompt row.
pub struct Prompt {
    /// Text shown before the input.
    pub message: String,
    /// What the user typed so far.
    pub input: String,
    /// Cursor offset into `input`, in characters.
    pub cursor_pos: usize,
    kind: PromptKind,
}

impl Prompt {
    fn new(message: &str, kind: PromptKind) -> Self {
        Self {
            message: message.to_string(),
            input: String::new(),
            cursor_pos: 0,
            kind,
        }
    }
}

/// How the interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Normal quit (q/Esc).
    Quit,
    /// Interactive interrupt (Ctrl+C); mapped to exit code 1.
    Interrupted,
}

/// The interactive shell - selection, prompts, help and the event loop
pub struct App {
    manager: TabManager,

    /// Index of the selected row in the tab list.
    selected: usize,

    /// Status message (shown in the bottom line)
    status_message: Option<String>,

    /// Active line-input prompt, if any.
    prompt: Option<Prompt>,

    /// Help page state.
    help: HelpRenderer,

    /// Should the shell quit?
    should_quit: bool,

    /// Whether the quit was an interactive interrupt.
    interrupted: bool,
}

impl App {
    pub fn new(manager: TabManager) -> Self {
        Self {
            manager,
            selected: 0,
            status_message: Some("Press ? for help.".to_string()),
            prompt: None,
            help: HelpRenderer::new(),
            should_quit: false,
            interrupted: false,
        }
    }

    /// Run the draw/read/dispatch loop until the user quits.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<Outcome> {
        while !self.should_quit {
            self.manager.refresh();
            self.clamp_selection();

            terminal.draw(|frame| self.render(frame))?;

            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }

        // Running tabs intentionally stay alive so users keep their
        // shells after quitting the multiplexer.
        Ok(if self.interrupted {
            Outcome::Interrupted
        } else {
            Outcome::Quit
        })
    }

    fn render(&mut self, frame: &mut Frame) {
        if self.help.is_visible() {
            let area = frame.area();
            self.help.render(frame, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame.area());

        HeaderRenderer::render(frame, chunks[0], &self.manager);
        TabListRenderer::render(frame, chunks[1], self.manager.tabs(), self.selected);
        StatusBarRenderer::render(frame, chunks[2], &self.status_message, &self.prompt);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Any key dismisses the help page.
        if self.help.is_visible() {
            self.help.toggle();
            self.status_message = Some("Press ? for help.".to_string());
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.interrupted = true;
                self.should_quit = true;
            }
            return;
        }

        let tab_count = self.manager.tabs().len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') | KeyCode::Char('h') => self.help.toggle(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if tab_count > 0 {
                    self.selected = (self.selected + 1).min(tab_count - 1);
                }
            }
            KeyCode::Char('n') => {
                self.prompt = Some(Prompt::new("Title (optional): ", PromptKind::CreateTitle));
            }
            KeyCode::Char('r') => {
                if let Some(id) = self.selected_id() {
                    self.prompt = Some(Prompt::new("New title: ", PromptKind::Rename { id }));
                }
            }
            KeyCode::Char('c') => {
                if let Some(id) = self.selected_id() {
                    self.manager.close(id);
                    self.status_message = Some("Sent termination signal to tab.".to_string());
                }
            }
            KeyCode::Char('x') => {
                let removed = self.manager.prune();
                self.status_message = Some(format!("Removed {removed} tab(s)."));
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.status_message = Some(if self.manager.focus(id) {
                        "Focus command sent to WM.".to_string()
                    } else {
                        "Unable to focus window automatically.".to_string()
                    });
                }
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.interrupted = true;
                self.should_quit = true;
            }
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.status_message = Some("Cancelled.".to_string());
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit_prompt(prompt);
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    if prompt.input.pop().is_some() {
                        prompt.cursor_pos -= 1;
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.input.push(c);
                    prompt.cursor_pos += 1;
                }
            }
            _ => {}
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        let input = prompt.input.trim().to_string();
        match prompt.kind {
            PromptKind::CreateTitle => {
                // Blank title falls back to the manager's default label;
                // ask for the command next.
                let title = (!input.is_empty()).then_some(input);
                self.prompt = Some(Prompt::new(
                    "Command (optional): ",
                    PromptKind::CreateCommand { title },
                ));
            }
            PromptKind::CreateCommand { title } => {
                let command = (!input.is_empty()).then_some(input);
                match self
                    .manager
                    .create(title.as_deref(), command.as_deref(), None)
                {
                    Ok(_) => self.status_message = Some("Created new tab.".to_string()),
                    Err(e) => self.status_message = Some(format!("Failed to create tab: {e}")),
                }
            }
            PromptKind::Rename { id } => {
                if input.is_empty() {
                    self.status_message = Some("Rename cancelled.".to_string());
                } else {
                    self.manager.rename(id, input);
                    self.status_message = Some("Renamed tab.".to_string());
                }
            }
        }
    }

    fn selected_id(&self) -> Option<TabId> {
        self.manager.tabs().get(self.selected).map(|tab| tab.id)
    }

    fn clamp_selection(&mut self) {
        let tab_count = self.manager.tabs().len();
        if tab_count == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(tab_count - 1);
        }
    }
}
