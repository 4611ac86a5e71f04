use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// The state of a single file's content as shown in the modal.
///
/// Exactly one tag is active at a time. Everything that consumes a variant
/// matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentVariant {
  Loading,
  Error { message: String },
  Image { base64: String, extension: String },
  Text { content: String },
}

impl ContentVariant {
  pub fn error(message: impl Into<String>) -> Self {
    ContentVariant::Error { message: message.into() }
  }

  pub fn is_loading(&self) -> bool {
    matches!(self, ContentVariant::Loading)
  }
}

/// The `type` field of a file content response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
  Image,
  /// Anything the backend did not label as an image.
  Text,
}

impl From<&str> for ContentKind {
  fn from(value: &str) -> Self {
    match value {
      "image" => ContentKind::Image,
      _ => ContentKind::Text,
    }
  }
}

/// The `data` object of a successful `/file-content/` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
  pub content: String,
  pub kind: ContentKind,
  pub extension: String,
  pub filename: String,
}

impl From<FileContent> for ContentVariant {
  fn from(file: FileContent) -> Self {
    match file.kind {
      ContentKind::Image => ContentVariant::Image { base64: file.content, extension: file.extension },
      ContentKind::Text => ContentVariant::Text { content: file.content },
    }
  }
}

impl From<FetchError> for ContentVariant {
  fn from(err: FetchError) -> Self {
    ContentVariant::error(err.to_string())
  }
}
