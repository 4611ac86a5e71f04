use tracing::warn;

use super::types::RepoApi;
use crate::{error::FetchError, model::ContentVariant};

pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "file format is not supported";

/// Fetches one file and maps the response onto a content variant. Always
/// resolves to a terminal variant, failures become a generic error.
pub async fn fetch_file_content(api: &dyn RepoApi, location: &str, path: &str) -> ContentVariant {
  match api.file_content(location, path).await {
    Ok(file) => ContentVariant::from(file),
    Err(err) => {
      warn!("Loading {} from {} failed: {} ({:?})", path, location, err, err.backend_detail());
      ContentVariant::from(FetchError::Content(UNSUPPORTED_FORMAT_MESSAGE.to_string()))
    },
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
  use crate::{api::HttpRepoApi, config::ApiConfig};

  const LOCATION: &str = "https://github.com/x/y";

  async fn server_returning(template: ResponseTemplate) -> (MockServer, HttpRepoApi) {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/file-content/")).respond_with(template).mount(&server).await;
    let api = HttpRepoApi::new(&ApiConfig { base_url: server.uri(), timeout_secs: 5 }).unwrap();
    (server, api)
  }

  fn envelope(content: &str, kind: &str, extension: &str) -> serde_json::Value {
    json!({
      "success": true,
      "data": {"content": content, "type": kind, "extension": extension, "filename": format!("f.{extension}")}
    })
  }

  #[tokio::test]
  async fn test_image_keeps_base64_and_extension() {
    let (_server, api) =
      server_returning(ResponseTemplate::new(200).set_body_json(envelope("iVBORw0KGgo=", "image", "png"))).await;

    let variant = fetch_file_content(&api, LOCATION, "logo.png").await;

    assert_eq!(variant, ContentVariant::Image { base64: "iVBORw0KGgo=".to_string(), extension: "png".to_string() });
  }

  #[tokio::test]
  async fn test_text_is_verbatim() {
    let (_server, api) =
      server_returning(ResponseTemplate::new(200).set_body_json(envelope("fn main() {}\n\t// tab", "text", "rs")))
        .await;

    let variant = fetch_file_content(&api, LOCATION, "main.rs").await;

    assert_eq!(variant, ContentVariant::Text { content: "fn main() {}\n\t// tab".to_string() });
  }

  #[tokio::test]
  async fn test_unknown_type_is_text() {
    let (_server, api) =
      server_returning(ResponseTemplate::new(200).set_body_json(envelope("<svg/>", "vector", "svg"))).await;

    let variant = fetch_file_content(&api, LOCATION, "icon.svg").await;

    assert_eq!(variant, ContentVariant::Text { content: "<svg/>".to_string() });
  }

  #[tokio::test]
  async fn test_error_status_is_generic() {
    let (_server, api) = server_returning(
      ResponseTemplate::new(400).set_body_json(json!({"success": false, "error": "File format is not supported for viewing"})),
    )
    .await;

    let variant = fetch_file_content(&api, LOCATION, "a.exe").await;

    assert_eq!(variant, ContentVariant::error(UNSUPPORTED_FORMAT_MESSAGE));
  }

  #[tokio::test]
  async fn test_detail_is_not_surfaced() {
    let (_server, api) =
      server_returning(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"}))).await;

    let variant = fetch_file_content(&api, LOCATION, "gone.txt").await;

    assert_eq!(variant, ContentVariant::error(UNSUPPORTED_FORMAT_MESSAGE));
  }

  #[tokio::test]
  async fn test_malformed_body_is_generic() {
    let (_server, api) = server_returning(ResponseTemplate::new(200).set_body_string("definitely not json")).await;

    let variant = fetch_file_content(&api, LOCATION, "a.txt").await;

    assert_eq!(variant, ContentVariant::error(UNSUPPORTED_FORMAT_MESSAGE));
  }

  #[tokio::test]
  async fn test_query_parameters_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/file-content/"))
      .and(query_param("repo_url", LOCATION))
      .and(query_param("file_path", "src/a&b.js"))
      .respond_with(ResponseTemplate::new(200).set_body_json(envelope("x", "text", "js")))
      .expect(1)
      .mount(&server)
      .await;
    let api = HttpRepoApi::new(&ApiConfig { base_url: server.uri(), timeout_secs: 5 }).unwrap();

    let variant = fetch_file_content(&api, LOCATION, "src/a&b.js").await;

    assert_eq!(variant, ContentVariant::Text { content: "x".to_string() });
  }

  #[tokio::test]
  async fn test_transport_failure_is_generic() {
    let api = HttpRepoApi::new(&ApiConfig { base_url: "http://127.0.0.1:1".to_string(), timeout_secs: 5 }).unwrap();

    let variant = fetch_file_content(&api, LOCATION, "a.txt").await;

    assert_eq!(variant, ContentVariant::error(UNSUPPORTED_FORMAT_MESSAGE));
  }
}
