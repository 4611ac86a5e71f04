use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;

use super::types::RepoApi;
use crate::{
  error::Error,
  model::{ContentKind, FileContent},
};

/// In-memory backend. Content responses can be delayed per path to simulate
/// responses arriving out of order.
#[derive(Clone, Debug)]
pub struct MockRepoApi {
  files: Result<Vec<String>, String>,
  contents: HashMap<String, (Duration, FileContent)>,
}

impl Default for MockRepoApi {
  fn default() -> Self {
    MockRepoApi { files: Ok(vec!["README.md".to_string(), "src/a.js".to_string()]), contents: HashMap::new() }
  }
}

impl MockRepoApi {
  pub fn with_files(mut self, files: &[&str]) -> Self {
    self.files = Ok(files.iter().map(|f| f.to_string()).collect());
    self
  }

  pub fn with_list_error(mut self, detail: &str) -> Self {
    self.files = Err(detail.to_string());
    self
  }

  pub fn with_text(self, path: &str, content: &str) -> Self {
    self.with_delayed(path, Duration::ZERO, ContentKind::Text, content)
  }

  pub fn with_image(self, path: &str, base64: &str) -> Self {
    self.with_delayed(path, Duration::ZERO, ContentKind::Image, base64)
  }

  pub fn with_delayed(mut self, path: &str, delay: Duration, kind: ContentKind, content: &str) -> Self {
    let extension = path.rsplit('.').next().unwrap_or_default().to_lowercase();
    let file = FileContent { content: content.to_string(), kind, extension, filename: path.to_string() };
    self.contents.insert(path.to_string(), (delay, file));
    self
  }
}

#[async_trait]
impl RepoApi for MockRepoApi {
  async fn repo_files(&self, _location: &str) -> Result<Vec<String>, Error> {
    match &self.files {
      Ok(files) => Ok(files.clone()),
      Err(detail) => {
        Err(Error::Status { status: 400, detail: Some(detail.clone()).filter(|detail| !detail.is_empty()) })
      },
    }
  }

  async fn file_content(&self, _location: &str, path: &str) -> Result<FileContent, Error> {
    match self.contents.get(path) {
      Some((delay, file)) => {
        if !delay.is_zero() {
          tokio::time::sleep(*delay).await;
        }
        Ok(file.clone())
      },
      None => Err(Error::Status { status: 404, detail: Some("not found".to_string()) }),
    }
  }
}
