use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
  content::ContentVariant,
  file_list::FileList,
  modal::{ContentRequest, ModalController},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
  Idle,
  Loading(SystemTime),
  Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
  pub id: u64,
  pub location: String,
}

/// Everything the repository explorer shows, independent of how it is drawn.
///
/// Fetches are not performed here. Methods that start one return the request
/// to run, and the matching `receive_*` method applies its outcome.
#[derive(Debug)]
pub struct ExplorerState {
  location: String,
  files: FileList,
  status: FetchStatus,
  modal: ModalController,
  last_list_request: u64,
  pending_list_request: Option<u64>,
}

impl Default for ExplorerState {
  fn default() -> Self {
    ExplorerState {
      location: String::new(),
      files: FileList::default(),
      status: FetchStatus::Idle,
      modal: ModalController::new(),
      last_list_request: 0,
      pending_list_request: None,
    }
  }
}

impl ExplorerState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn location(&self) -> &str {
    &self.location
  }

  pub fn files(&self) -> &FileList {
    &self.files
  }

  pub fn status(&self) -> &FetchStatus {
    &self.status
  }

  pub fn modal(&self) -> &ModalController {
    &self.modal
  }

  pub fn is_loading(&self) -> bool {
    matches!(self.status, FetchStatus::Loading(_))
  }

  pub fn error(&self) -> Option<&str> {
    match &self.status {
      FetchStatus::Error(message) => Some(message),
      _ => None,
    }
  }

  pub fn can_submit(&self, location: &str) -> bool {
    !self.is_loading() && !location.trim().is_empty()
  }

  /// Starts listing `location`. The previous list, error and any open file are
  /// cleared before the request is issued.
  pub fn submit(&mut self, location: &str) -> Option<ListRequest> {
    if !self.can_submit(location) {
      debug!("Ignoring submit of {:?}, loading: {}", location, self.is_loading());
      return None;
    }
    self.location = location.trim().to_string();
    self.files = FileList::default();
    self.modal.close();
    self.status = FetchStatus::Loading(SystemTime::now());
    self.last_list_request += 1;
    self.pending_list_request = Some(self.last_list_request);
    info!("Listing files of {}", self.location);
    Some(ListRequest { id: self.last_list_request, location: self.location.clone() })
  }

  /// Applies the outcome of a list request. Returns false for a stale request.
  pub fn receive_files(&mut self, request_id: u64, result: Result<FileList, String>) -> bool {
    if self.pending_list_request != Some(request_id) {
      debug!("Discarding stale file list for request {}", request_id);
      return false;
    }
    self.pending_list_request = None;
    match result {
      Ok(files) => {
        info!("Loaded {} files", files.len());
        self.files = files;
        self.status = FetchStatus::Idle;
      },
      Err(message) => {
        self.files = FileList::default();
        self.status = FetchStatus::Error(message);
      },
    }
    true
  }

  pub fn select_file(&mut self, index: usize) -> Option<ContentRequest> {
    let path = self.files.get(index)?.clone();
    Some(self.modal.select_file(path))
  }

  pub fn receive_content(&mut self, request: &ContentRequest, content: ContentVariant) -> bool {
    self.modal.receive_content(request, content)
  }

  pub fn close_modal(&mut self) {
    self.modal.close();
  }
}
