use crossterm::event::KeyCode;
use ratatui::{
  prelude::*,
  widgets::{Block, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;

use crate::{
  action::Action,
  components::{AsyncComponent, Component},
  tui::Event,
};

/// Full screen report of an application error. Scrolls with the arrow keys,
/// any other key dismisses it.
#[derive(Default)]
pub struct ErrorView {
  message: Option<String>,
  scroll: u16,
  last_height: u16,
}

impl ErrorView {
  pub fn message(&self) -> Option<&str> {
    self.message.as_deref()
  }

  fn show(&mut self, message: String) {
    self.message = Some(message);
    self.scroll = 0;
  }

  fn dismiss(&mut self) {
    self.message = None;
    self.scroll = 0;
    self.last_height = 0;
  }

  fn has_scrolled_to_bottom(&self) -> bool {
    match &self.message {
      Some(message) => self.scroll + self.last_height >= message.lines().count() as u16,
      None => true,
    }
  }
}

impl Component for ErrorView {
  fn register_action_handler(&mut self, _tx: UnboundedSender<Action>) -> color_eyre::Result<()> {
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame, area: Rect) -> color_eyre::Result<()> {
    self.last_height = area.height.saturating_sub(2);
    let paragraph = Paragraph::new(self.message.clone().unwrap_or_default())
      .block(
        Block::default()
          .title("Error")
          .title_bottom("↑↓: Scroll | any other key: Back")
          .style(Style::default().fg(Color::Red))
          .borders(Borders::ALL),
      )
      .wrap(Wrap { trim: false })
      .scroll((self.scroll, 0));

    frame.render_widget(paragraph, area);
    Ok(())
  }
}

#[async_trait::async_trait]
impl AsyncComponent for ErrorView {
  async fn handle_events(&mut self, event: Option<Event>) -> color_eyre::Result<Option<Action>> {
    let Some(Event::Key(key)) = event else {
      return Ok(None);
    };
    let action = match key.code {
      KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => {
        self.scroll = self.scroll.saturating_sub(1);
        None
      },
      KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => {
        if !self.has_scrolled_to_bottom() {
          self.scroll += 1;
        }
        None
      },
      _ => {
        self.dismiss();
        Some(Action::ExitError)
      },
    };
    Ok(action)
  }

  async fn update(&mut self, action: Action) -> color_eyre::Result<Option<Action>> {
    if let Action::Error(message) = action {
      self.show(message);
    }
    Ok(None)
  }
}
