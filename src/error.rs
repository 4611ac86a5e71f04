use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Http(#[from] reqwest::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error("invalid api url {url}: {reason}")]
  InvalidUrl { url: String, reason: String },
  #[error("backend responded with status {status}")]
  Status { status: u16, detail: Option<String> },
  #[error("backend reported an unsuccessful response")]
  Unsuccessful { detail: Option<String> },
}

impl Error {
  /// The human readable message the backend attached to a failed response, if any.
  pub fn backend_detail(&self) -> Option<&str> {
    match self {
      Error::Status { detail, .. } | Error::Unsuccessful { detail } => detail.as_deref(),
      _ => None,
    }
  }
}

/// Terminal, user visible failures of the two fetch operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  #[error("{0}")]
  List(String),
  #[error("{0}")]
  Content(String),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_backend_detail_from_status() {
    let err = Error::Status { status: 400, detail: Some("invalid github repo url.".to_string()) };

    assert_eq!(err.backend_detail(), Some("invalid github repo url."));
    assert_eq!(err.to_string(), "backend responded with status 400");
  }

  #[test]
  fn test_backend_detail_missing() {
    let err = Error::InvalidUrl { url: "nope".to_string(), reason: "relative URL without a base".to_string() };

    assert_eq!(err.backend_detail(), None);
  }
}
