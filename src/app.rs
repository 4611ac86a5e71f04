use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::error;

use crate::{
  action::Action,
  api::RepoApi,
  components::{AsyncComponent, ErrorView, ExplorerView},
  config::UiConfig,
  mode::Mode,
  tui::{self, Tui},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
  Explorer,
  Error,
}

pub struct App {
  pub explorer: Box<dyn AsyncComponent>,
  pub error_view: Box<dyn AsyncComponent>,
  pub should_quit: bool,
  pub should_suspend: bool,
  pub mode: Mode,
  pub view: View,
  tick_rate: f64,
  frame_rate: f64,
}

impl App {
  pub fn new(ui: &UiConfig, api: Arc<dyn RepoApi>, repo: Option<String>) -> Self {
    App {
      explorer: Box::new(ExplorerView::new(api, repo)),
      error_view: Box::new(ErrorView::default()),
      should_quit: false,
      should_suspend: false,
      mode: Mode::Default,
      view: View::Explorer,
      tick_rate: ui.tick_rate,
      frame_rate: ui.frame_rate,
    }
  }

  fn new_tui(&self) -> Result<Tui> {
    Ok(Tui::new()?.tick_rate(self.tick_rate).frame_rate(self.frame_rate).paste(true))
  }

  fn active(&mut self) -> &mut Box<dyn AsyncComponent> {
    match self.view {
      View::Explorer => &mut self.explorer,
      View::Error => &mut self.error_view,
    }
  }

  /// Global keys. Quitting is only possible when no view has claimed the keyboard.
  fn map_key(&self, key: KeyEvent) -> Option<Action> {
    if self.mode != Mode::Default || self.view != View::Explorer {
      return None;
    }
    match key {
      KeyEvent { code: KeyCode::Char('q'), .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('c' | 'C'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Quit),
      KeyEvent { code: KeyCode::Char('z' | 'Z'), modifiers: KeyModifiers::CONTROL, .. } => Some(Action::Suspend),
      _ => None,
    }
  }

  /// Applies an action to the app itself. Mode changes are driven by the
  /// explorer so the global key map knows when keys belong to it.
  fn apply(&mut self, action: &Action) {
    match action {
      Action::StartInputMode => self.mode = Mode::Input,
      Action::EndInputMode | Action::ModalClosed => self.mode = Mode::Default,
      Action::ModalOpened => self.mode = Mode::Modal,
      Action::Error(message) => {
        error!("{}", message);
        self.view = View::Error;
      },
      Action::ExitError => self.view = View::Explorer,
      Action::Quit => self.should_quit = true,
      Action::Suspend => self.should_suspend = true,
      Action::Resume => self.should_suspend = false,
      _ => {},
    }
  }

  fn render(&mut self, tui: &mut Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
    let component = self.active();
    tui.draw(|f| {
      let area = f.area();
      if let Err(e) = component.draw(f, area) {
        let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", e)));
      }
    })?;
    Ok(())
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = self.new_tui()?;
    tui.enter()?;

    self.explorer.register_action_handler(action_tx.clone())?;
    self.error_view.register_action_handler(action_tx.clone())?;

    loop {
      if let Some(e) = tui.next().await {
        match e {
          tui::Event::Tick => action_tx.send(Action::Tick)?,
          tui::Event::Render => action_tx.send(Action::Render)?,
          tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
          tui::Event::Key(key) => {
            if let Some(action) = self.map_key(key) {
              action_tx.send(action)?;
            }
          },
          _ => {},
        }

        if let Some(action) = self.active().handle_events(Some(e.clone())).await? {
          action_tx.send(action)?;
        }
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Tick && action != Action::Render {
          log::debug!("{action:?}");
        }
        self.apply(&action);

        match action {
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            self.render(&mut tui, &action_tx)?;
          },
          Action::Render => self.render(&mut tui, &action_tx)?,
          _ => {},
        }

        // Results of background fetches always go to the explorer, even while
        // an error is displayed.
        let target = match action {
          Action::Error(_) => &mut self.error_view,
          _ => &mut self.explorer,
        };
        if let Some(action) = target.update(action).await? {
          action_tx.send(action)?
        };
      }
      if self.should_suspend {
        tui.suspend()?;
        action_tx.send(Action::Resume)?;
        tui = self.new_tui()?;
        tui.enter()?;
      } else if self.should_quit {
        tui.stop()?;
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }
}
