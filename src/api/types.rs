use async_trait::async_trait;
use serde::Deserialize;

use crate::{error::Error, model::FileContent};

/// The backend that does the actual repository access.
#[async_trait]
pub trait RepoApi: Send + Sync {
  /// `GET /repo-files/`
  async fn repo_files(&self, location: &str) -> Result<Vec<String>, Error>;
  /// `GET /file-content/`
  async fn file_content(&self, location: &str, path: &str) -> Result<FileContent, Error>;
}

/// Body of a failed response. The list endpoint sets `detail`, the content
/// endpoint sets `error`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
  #[serde(default)]
  detail: Option<serde_json::Value>,
  #[serde(default)]
  error: Option<serde_json::Value>,
}

impl ErrorBody {
  pub(crate) fn into_message(self) -> Option<String> {
    self.detail.or(self.error).and_then(|value| match value {
      serde_json::Value::Null => None,
      serde_json::Value::String(message) if message.is_empty() => None,
      serde_json::Value::String(message) => Some(message),
      other => Some(other.to_string()),
    })
  }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentEnvelope {
  #[serde(default)]
  pub success: bool,
  pub data: Option<ContentData>,
  #[serde(default)]
  pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentData {
  pub content: String,
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub extension: String,
  #[serde(default)]
  pub filename: String,
}

impl From<ContentData> for FileContent {
  fn from(data: ContentData) -> Self {
    FileContent {
      kind: data.kind.as_str().into(),
      content: data.content,
      extension: data.extension,
      filename: data.filename,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::ContentKind;

  #[test]
  fn test_error_body_prefers_detail() {
    let body: ErrorBody = serde_json::from_str(r#"{"detail": "not found", "error": "other"}"#).unwrap();

    assert_eq!(body.into_message(), Some("not found".to_string()));
  }

  #[test]
  fn test_error_body_falls_back_to_error_field() {
    let body: ErrorBody = serde_json::from_str(r#"{"success": false, "error": "File format is not supported for viewing"}"#).unwrap();

    assert_eq!(body.into_message(), Some("File format is not supported for viewing".to_string()));
  }

  #[test]
  fn test_error_body_without_message() {
    let body: ErrorBody = serde_json::from_str(r#"{"detail": null}"#).unwrap();

    assert_eq!(body.into_message(), None);
  }

  #[test]
  fn test_error_body_structured_detail_is_stringified() {
    let body: ErrorBody = serde_json::from_str(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();

    assert_eq!(body.into_message(), Some(r#"[{"msg":"field required"}]"#.to_string()));
  }

  #[test]
  fn test_content_envelope_to_file_content() {
    let envelope: ContentEnvelope = serde_json::from_str(
      r#"{"success": true, "data": {"content": "abc", "type": "image", "extension": "gif", "filename": "a.gif"}}"#,
    )
    .unwrap();

    let file = FileContent::from(envelope.data.unwrap());

    assert_eq!(file.kind, ContentKind::Image);
    assert_eq!(file.extension, "gif");
    assert_eq!(file.filename, "a.gif");
  }
}
