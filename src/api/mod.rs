pub mod file_content_fetcher;
pub mod file_list_fetcher;
pub mod http_repo_api;
#[cfg(test)]
pub mod mock_repo_api;
pub mod types;

pub use file_content_fetcher::{UNSUPPORTED_FORMAT_MESSAGE, fetch_file_content};
pub use file_list_fetcher::{FILE_LIST_FALLBACK_MESSAGE, fetch_file_list};
pub use http_repo_api::HttpRepoApi;
#[cfg(test)]
pub use mock_repo_api::MockRepoApi;
pub use types::RepoApi;
