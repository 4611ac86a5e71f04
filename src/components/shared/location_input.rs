use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::Rect,
  style::{Color, Modifier, Style},
  widgets::{Block, Borders},
};
use tui_textarea::{CursorMove, Input, TextArea};

use crate::{action::Action, tui::Frame};

const PROMPT: &str = "Repository URL";
const LOADING_PROMPT: &str = "Loading...";

/// Single line input holding the repository location.
pub struct LocationInput {
  text_input: TextArea<'static>,
  focused: bool,
  loading: bool,
}

impl Default for LocationInput {
  fn default() -> Self {
    let mut input = LocationInput { text_input: TextArea::default(), focused: false, loading: false };
    input.restyle();
    input
  }
}

impl LocationInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn value(&self) -> String {
    self.text_input.lines().first().map(|line| line.trim().to_string()).unwrap_or_default()
  }

  pub fn set_value(&mut self, value: &str) {
    self.clear();
    self.text_input.insert_str(value);
  }

  pub fn title(&self) -> &'static str {
    if self.loading { LOADING_PROMPT } else { PROMPT }
  }

  pub fn set_focused(&mut self, focused: bool) {
    self.focused = focused;
    self.restyle();
  }

  pub fn set_loading(&mut self, loading: bool) {
    if self.loading != loading {
      self.loading = loading;
      self.restyle();
    }
  }

  /// Pasted text is inserted on the current line, newlines dropped.
  pub fn paste(&mut self, text: &str) {
    let line: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    self.text_input.insert_str(line);
  }

  pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<Action> {
    match key_event.code {
      KeyCode::Esc => Some(Action::EndInputMode),
      KeyCode::Enter => {
        let value = self.value();
        if value.is_empty() { None } else { Some(Action::SubmitLocation(value)) }
      },
      _ => {
        self.text_input.input(Input::from(key_event));
        None
      },
    }
  }

  pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
    f.render_widget(&self.text_input, area);
  }

  fn clear(&mut self) {
    self.text_input.move_cursor(CursorMove::Head);
    self.text_input.delete_line_by_end();
  }

  fn restyle(&mut self) {
    let border = if self.focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    let cursor = if self.focused { Style::default().add_modifier(Modifier::REVERSED) } else { Style::default() };
    self.text_input.set_style(Style::default().fg(Color::White));
    self.text_input.set_cursor_line_style(Style::default());
    self.text_input.set_cursor_style(cursor);
    self.text_input.set_block(Block::default().borders(Borders::ALL).border_style(border).title(self.title()));
  }
}
