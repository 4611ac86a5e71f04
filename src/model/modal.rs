use serde::{Deserialize, Serialize};
use tracing::debug;

use super::content::ContentVariant;

/// Identifies one content fetch. Ids are monotonic so selecting the same path
/// twice still yields two distinct requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRequest {
  pub id: u64,
  pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
  #[default]
  Closed,
  Open { request: ContentRequest, content: ContentVariant },
}

/// Open/close lifecycle of the file content overlay.
///
/// Content is only ever held while a file is selected, and a result is only
/// accepted for the request that is currently displayed.
#[derive(Debug, Default)]
pub struct ModalController {
  state: ModalState,
  last_request_id: u64,
}

impl ModalController {
  pub fn new() -> Self {
    Self::default()
  }

  /// Opens the modal for `path` in the loading state and returns the request
  /// the caller should fetch content for.
  pub fn select_file(&mut self, path: impl Into<String>) -> ContentRequest {
    self.last_request_id += 1;
    let request = ContentRequest { id: self.last_request_id, path: path.into() };
    self.state = ModalState::Open { request: request.clone(), content: ContentVariant::Loading };
    request
  }

  /// Applies a fetched result. Returns false when the result is stale and was discarded.
  pub fn receive_content(&mut self, request: &ContentRequest, variant: ContentVariant) -> bool {
    match &mut self.state {
      ModalState::Open { request: current, content } if current == request => {
        *content = variant;
        true
      },
      _ => {
        debug!("Discarding stale content for {} (request {})", request.path, request.id);
        false
      },
    }
  }

  pub fn close(&mut self) {
    self.state = ModalState::Closed;
  }

  pub fn is_open(&self) -> bool {
    matches!(self.state, ModalState::Open { .. })
  }

  pub fn selected_file(&self) -> Option<&str> {
    match &self.state {
      ModalState::Open { request, .. } => Some(request.path.as_str()),
      ModalState::Closed => None,
    }
  }

  pub fn content(&self) -> Option<&ContentVariant> {
    match &self.state {
      ModalState::Open { content, .. } => Some(content),
      ModalState::Closed => None,
    }
  }

  pub fn state(&self) -> &ModalState {
    &self.state
  }
}
