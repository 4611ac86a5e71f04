use tracing::warn;

use super::types::RepoApi;
use crate::{error::FetchError, model::FileList};

pub const FILE_LIST_FALLBACK_MESSAGE: &str = "Failed to fetch repository files.";

/// Lists the files of `location`. Backend supplied detail is surfaced when
/// present, every other failure becomes the fallback message.
pub async fn fetch_file_list(api: &dyn RepoApi, location: &str) -> Result<FileList, FetchError> {
  match api.repo_files(location).await {
    Ok(paths) => Ok(FileList::from(paths)),
    Err(err) => {
      warn!("Listing {} failed: {}", location, err);
      let message = err.backend_detail().unwrap_or(FILE_LIST_FALLBACK_MESSAGE).to_string();
      Err(FetchError::List(message))
    },
  }
}
