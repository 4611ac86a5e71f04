use derive_deref::{Deref, DerefMut};
use serde::{Deserialize, Serialize};

/// File paths of a repository in the order the backend returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut, Serialize, Deserialize)]
pub struct FileList(Vec<String>);

impl FileList {
  pub fn into_inner(self) -> Vec<String> {
    self.0
  }
}

impl From<Vec<String>> for FileList {
  fn from(paths: Vec<String>) -> Self {
    FileList(paths)
  }
}

impl<'a> FromIterator<&'a str> for FileList {
  fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
    FileList(iter.into_iter().map(String::from).collect())
  }
}
