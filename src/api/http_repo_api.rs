use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{error, info};

use super::types::{ContentEnvelope, ErrorBody, RepoApi};
use crate::{config::ApiConfig, error::Error, model::FileContent};

const REPO_FILES_PATH: &str = "repo-files/";
const FILE_CONTENT_PATH: &str = "file-content/";

pub struct HttpRepoApi {
  client: Client,
  base_url: Url,
}

impl HttpRepoApi {
  pub fn new(config: &ApiConfig) -> Result<HttpRepoApi, Error> {
    let base_url = parse_base_url(&config.base_url)?;
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .build()?;
    Ok(HttpRepoApi { client, base_url })
  }

  fn endpoint(&self, path: &str) -> Result<Url, Error> {
    self
      .base_url
      .join(path)
      .map_err(|err| Error::InvalidUrl { url: format!("{}{}", self.base_url, path), reason: err.to_string() })
  }

  async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, Error> {
    let url = self.endpoint(path)?;
    info!("GET {}", url);
    let response = self.client.get(url).query(query).send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let detail = match response.json::<ErrorBody>().await {
      Ok(body) => body.into_message(),
      Err(err) => {
        error!("Unreadable error body for {} response: {}", status, err);
        None
      },
    };
    error!("GET {} failed with {}: {:?}", path, status, detail);
    Err(Error::Status { status: status.as_u16(), detail })
  }
}

/// Relative endpoint paths are joined onto the base, so it has to end in a slash.
fn parse_base_url(raw: &str) -> Result<Url, Error> {
  let normalised = if raw.ends_with('/') { raw.to_string() } else { format!("{raw}/") };
  Url::parse(&normalised).map_err(|err| Error::InvalidUrl { url: raw.to_string(), reason: err.to_string() })
}

#[async_trait]
impl RepoApi for HttpRepoApi {
  async fn repo_files(&self, location: &str) -> Result<Vec<String>, Error> {
    let response = self.get(REPO_FILES_PATH, &[("repo_url", location)]).await?;
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
  }

  async fn file_content(&self, location: &str, path: &str) -> Result<FileContent, Error> {
    let response = self.get(FILE_CONTENT_PATH, &[("repo_url", location), ("file_path", path)]).await?;
    let body = response.bytes().await?;
    let envelope: ContentEnvelope = serde_json::from_slice(&body)?;
    match envelope {
      ContentEnvelope { success: true, data: Some(data), .. } => Ok(data.into()),
      ContentEnvelope { error, .. } => Err(Error::Unsuccessful { detail: error }),
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
  };

  use super::*;
  use crate::model::ContentKind;

  const LOCATION: &str = "https://github.com/x/y";

  fn api_for(server: &MockServer) -> HttpRepoApi {
    HttpRepoApi::new(&ApiConfig { base_url: server.uri(), timeout_secs: 5 }).unwrap()
  }

  #[test]
  fn test_parse_base_url_appends_slash() {
    let url = parse_base_url("http://localhost:8000/api").unwrap();

    assert_eq!(url.join(REPO_FILES_PATH).unwrap().as_str(), "http://localhost:8000/api/repo-files/");
  }

  #[test]
  fn test_parse_base_url_rejects_garbage() {
    let result = parse_base_url("not a url");

    assert!(matches!(result, Err(Error::InvalidUrl { .. })));
  }

  #[tokio::test]
  async fn test_repo_files_sends_encoded_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/repo-files/"))
      .and(query_param("repo_url", LOCATION))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!(["README.md", "src/a.js"])))
      .expect(1)
      .mount(&server)
      .await;

    let files = api_for(&server).repo_files(LOCATION).await.unwrap();

    assert_eq!(files, vec!["README.md".to_string(), "src/a.js".to_string()]);
  }

  #[tokio::test]
  async fn test_repo_files_percent_encodes_reserved_characters() {
    let server = MockServer::start().await;
    let location = "https://github.com/x/y?ref=a&b=#c";
    Mock::given(method("GET"))
      .and(path("/repo-files/"))
      .and(query_param("repo_url", location))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .expect(1)
      .mount(&server)
      .await;

    let files = api_for(&server).repo_files(location).await.unwrap();

    assert!(files.is_empty());
  }

  #[tokio::test]
  async fn test_repo_files_error_status_keeps_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/repo-files/"))
      .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "invalid github repo url."})))
      .mount(&server)
      .await;

    let err = api_for(&server).repo_files("nope").await.unwrap_err();

    assert!(matches!(err, Error::Status { status: 400, .. }));
    assert_eq!(err.backend_detail(), Some("invalid github repo url."));
  }

  #[tokio::test]
  async fn test_repo_files_error_status_without_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/repo-files/"))
      .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
      .mount(&server)
      .await;

    let err = api_for(&server).repo_files(LOCATION).await.unwrap_err();

    assert!(matches!(err, Error::Status { status: 502, detail: None }));
  }

  #[tokio::test]
  async fn test_file_content_sends_both_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/file-content/"))
      .and(query_param("repo_url", LOCATION))
      .and(query_param("file_path", "docs/my notes.md"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": {"content": "# Notes", "type": "text", "extension": "md", "filename": "docs/my notes.md"}
      })))
      .expect(1)
      .mount(&server)
      .await;

    let file = api_for(&server).file_content(LOCATION, "docs/my notes.md").await.unwrap();

    assert_eq!(file, FileContent {
      content: "# Notes".to_string(),
      kind: ContentKind::Text,
      extension: "md".to_string(),
      filename: "docs/my notes.md".to_string(),
    });
  }

  #[tokio::test]
  async fn test_file_content_unsuccessful_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/file-content/"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false, "error": "nope"})))
      .mount(&server)
      .await;

    let err = api_for(&server).file_content(LOCATION, "a.bin").await.unwrap_err();

    assert_eq!(err.backend_detail(), Some("nope"));
  }
}
