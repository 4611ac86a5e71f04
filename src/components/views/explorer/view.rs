use std::{sync::Arc, time::SystemTime};

use async_trait::async_trait;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, warn};

use super::{file_item::FileItem, modal};
use crate::{
  action::Action,
  api::{RepoApi, fetch_file_content, fetch_file_list},
  components::{
    AsyncComponent, Component,
    shared::{InstructionFooter, LocationInput},
  },
  model::{ContentRequest, ExplorerState, FetchStatus, ListRequest},
  tui::{Event, Frame},
};

const PAGE_SCROLL: u16 = 10;
const LIST_TITLE: &str = "Repository Files";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
  Selection,
  Input,
}

/// Lists the files of a remote repository and shows one file's content in a
/// popup on top of the list.
pub struct ExplorerView {
  api: Arc<dyn RepoApi>,
  initial_location: Option<String>,
  state: ExplorerState,
  focus: Focus,
  list_state: ListState,
  location_input: LocationInput,
  content_scroll: u16,
  content_max_scroll: u16,
  footer: InstructionFooter,
  action_tx: Option<UnboundedSender<Action>>,
}

impl ExplorerView {
  pub fn new(api: Arc<dyn RepoApi>, initial_location: Option<String>) -> Self {
    ExplorerView {
      api,
      initial_location,
      state: ExplorerState::new(),
      focus: Focus::Selection,
      list_state: ListState::default(),
      location_input: LocationInput::new(),
      content_scroll: 0,
      content_max_scroll: 0,
      footer: InstructionFooter::default(),
      action_tx: None,
    }
  }

  pub fn state(&self) -> &ExplorerState {
    &self.state
  }

  pub fn selected(&self) -> Option<usize> {
    self.list_state.selected()
  }

  fn send_action(&self, action: Action) {
    if let Some(tx) = &self.action_tx {
      if let Err(err) = tx.send(action) {
        warn!("Failed to send action: {}", err);
      }
    }
  }

  fn spawn_list_fetch(&self, request: ListRequest) {
    let Some(tx) = self.action_tx.clone() else {
      warn!("No action handler registered, dropping list request {}", request.id);
      return;
    };
    let api = self.api.clone();
    tokio::spawn(async move {
      let result = fetch_file_list(api.as_ref(), &request.location).await.map_err(|err| err.to_string());
      if let Err(err) = tx.send(Action::FilesLoaded { request_id: request.id, result }) {
        warn!("Dropping file list for request {}: {}", request.id, err);
      }
    });
  }

  fn spawn_content_fetch(&self, request: ContentRequest) {
    let Some(tx) = self.action_tx.clone() else {
      warn!("No action handler registered, dropping content request {}", request.id);
      return;
    };
    let api = self.api.clone();
    let location = self.state.location().to_string();
    tokio::spawn(async move {
      let content = fetch_file_content(api.as_ref(), &location, &request.path).await;
      let (id, path) = (request.id, request.path.clone());
      if let Err(err) = tx.send(Action::ContentLoaded { request, content }) {
        warn!("Dropping content of {} for request {}: {}", path, id, err);
      }
    });
  }

  fn submit(&mut self, location: &str) -> Option<Action> {
    let had_modal = self.state.modal().is_open();
    let request = self.state.submit(location)?;
    self.location_input.set_value(&request.location);
    self.location_input.set_loading(true);
    self.list_state.select(None);
    self.reset_scroll();
    if had_modal {
      self.send_action(Action::ModalClosed);
    }
    self.spawn_list_fetch(request);
    if self.focus == Focus::Input { Some(Action::EndInputMode) } else { None }
  }

  fn select_next(&mut self) {
    let count = self.state.files().len();
    if count == 0 {
      return;
    }
    let next = self.list_state.selected().map_or(0, |index| (index + 1).min(count - 1));
    self.list_state.select(Some(next));
  }

  fn select_previous(&mut self) {
    if self.state.files().is_empty() {
      return;
    }
    let previous = self.list_state.selected().map_or(0, |index| index.saturating_sub(1));
    self.list_state.select(Some(previous));
  }

  fn open_selected(&mut self) -> Option<Action> {
    let index = self.list_state.selected()?;
    let request = self.state.select_file(index)?;
    info!("Opening {}", request.path);
    self.reset_scroll();
    self.spawn_content_fetch(request);
    Some(Action::ModalOpened)
  }

  fn reset_scroll(&mut self) {
    self.content_scroll = 0;
    self.content_max_scroll = 0;
  }

  /// The limit comes from the last draw, it depends on the popup size.
  fn scroll_content(&mut self, delta: i32) {
    let scrolled = (self.content_scroll as i32 + delta).clamp(0, self.content_max_scroll as i32);
    self.content_scroll = scrolled as u16;
  }

  fn handle_modal_key(&mut self, key: KeyEvent) -> Option<Action> {
    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
      KeyCode::Up | KeyCode::Char('k') => {
        self.scroll_content(-1);
        None
      },
      KeyCode::Down | KeyCode::Char('j') => {
        self.scroll_content(1);
        None
      },
      KeyCode::PageUp => {
        self.scroll_content(-(PAGE_SCROLL as i32));
        None
      },
      KeyCode::PageDown => {
        self.scroll_content(PAGE_SCROLL as i32);
        None
      },
      _ => None,
    }
  }

  fn handle_selection_key(&self, key: KeyEvent) -> Option<Action> {
    match key.code {
      KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
      KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
      KeyCode::Enter => Some(Action::OpenSelectedFile),
      KeyCode::Char('e' | 'i' | '/') => Some(Action::StartInputMode),
      KeyCode::Char('r') => Some(Action::Refresh),
      _ => None,
    }
  }

  fn handle_input_key(&mut self, key: KeyEvent) -> Option<Action> {
    match self.location_input.handle_key(key) {
      Some(Action::SubmitLocation(location)) if !self.state.can_submit(&location) => None,
      action => action,
    }
  }

  fn instructions(&self) -> Vec<&'static str> {
    if self.state.modal().is_open() {
      return vec!["Esc/q: Close", "↑↓/PgUp/PgDn: Scroll"];
    }
    match self.focus {
      Focus::Input => vec!["Enter: List files", "Esc: Cancel"],
      Focus::Selection => {
        let mut instructions = vec!["q: Quit", "e: Edit location"];
        if !self.state.location().is_empty() {
          instructions.push("r: Refresh");
        }
        if !self.state.files().is_empty() {
          instructions.push("↑↓: Select");
          instructions.push("Enter: Open");
        }
        instructions
      },
    }
  }

  fn status_line(&self) -> Line<'static> {
    match self.state.status() {
      FetchStatus::Loading(time) => Line::styled(
        format!("Fetching files... ({})", format_time_elapsed(*time)),
        Style::default().add_modifier(Modifier::DIM),
      ),
      FetchStatus::Error(message) => Line::styled(message.clone(), Style::default().fg(Color::Red)),
      FetchStatus::Idle => Line::raw(format!("Total files: {}", self.state.files().len())),
    }
  }

  fn render_list(&mut self, f: &mut Frame<'_>, area: Rect) {
    let files = self.state.files();
    let items: Vec<ListItem> = files.iter().map(|path| FileItem::new(path).render()).collect();
    let mut block = Block::default().borders(Borders::ALL);
    if !files.is_empty() {
      block = block.title(LIST_TITLE);
    }
    let list = List::new(items)
      .block(block)
      .style(Style::default().fg(Color::White))
      .highlight_style(Style::default().add_modifier(Modifier::BOLD))
      .highlight_symbol("→")
      .repeat_highlight_symbol(true);

    f.render_stateful_widget(list, area, &mut self.list_state);
  }
}

impl Component for ExplorerView {
  fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
    self.action_tx = Some(tx);
    match self.initial_location.take() {
      Some(location) => self.send_action(Action::SubmitLocation(location)),
      None => self.send_action(Action::StartInputMode),
    }
    Ok(())
  }

  fn draw(&mut self, frame: &mut Frame<'_>, area: Rect) -> Result<()> {
    let [input_area, status_area, list_area, footer_area] =
      Layout::vertical([Constraint::Length(3), Constraint::Length(1), Constraint::Min(1), Constraint::Length(3)])
        .areas(area);

    self.location_input.render(frame, input_area);
    frame.render_widget(Paragraph::new(self.status_line()), status_area);
    self.render_list(frame, list_area);
    self.footer.render(frame, footer_area, &self.instructions());

    if let (Some(path), Some(content)) = (self.state.modal().selected_file(), self.state.modal().content()) {
      self.content_max_scroll = modal::render(frame, area, path, content, self.content_scroll);
      self.content_scroll = self.content_scroll.min(self.content_max_scroll);
    }
    Ok(())
  }
}

#[async_trait]
impl AsyncComponent for ExplorerView {
  async fn handle_events(&mut self, event: Option<Event>) -> Result<Option<Action>> {
    let action = match event {
      Some(Event::Key(key)) => {
        if self.state.modal().is_open() {
          self.handle_modal_key(key)
        } else if self.focus == Focus::Input {
          self.handle_input_key(key)
        } else {
          self.handle_selection_key(key)
        }
      },
      Some(Event::Paste(text)) if self.focus == Focus::Input => {
        self.location_input.paste(&text);
        None
      },
      _ => None,
    };
    Ok(action)
  }

  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    let next = match action {
      Action::StartInputMode => {
        self.focus = Focus::Input;
        self.location_input.set_focused(true);
        None
      },
      Action::EndInputMode => {
        self.focus = Focus::Selection;
        self.location_input.set_focused(false);
        None
      },
      Action::SubmitLocation(location) => self.submit(&location),
      Action::Refresh => {
        let location = self.state.location().to_string();
        if location.is_empty() { None } else { self.submit(&location) }
      },
      Action::FilesLoaded { request_id, result } => {
        if self.state.receive_files(request_id, result) {
          self.location_input.set_loading(false);
          self.list_state.select(if self.state.files().is_empty() { None } else { Some(0) });
        }
        None
      },
      Action::SelectNext => {
        self.select_next();
        None
      },
      Action::SelectPrevious => {
        self.select_previous();
        None
      },
      Action::OpenSelectedFile => self.open_selected(),
      Action::ContentLoaded { request, content } => {
        self.state.receive_content(&request, content);
        None
      },
      Action::CloseModal => {
        self.state.close_modal();
        self.reset_scroll();
        Some(Action::ModalClosed)
      },
      _ => None,
    };
    Ok(next)
  }
}

fn format_time_elapsed(time: SystemTime) -> String {
  match time.elapsed() {
    Ok(elapsed) => format!("{:.1}s", elapsed.as_secs_f64()),
    Err(err) => {
      warn!("Failed to get system time {}", err);
      String::from("xs")
    },
  }
}
