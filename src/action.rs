use serde::{Deserialize, Serialize};
use strum::Display;

use crate::model::{ContentRequest, ContentVariant, FileList};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  CloseModal,
  ContentLoaded { request: ContentRequest, content: ContentVariant },
  EndInputMode,
  Error(String),
  ExitError,
  FilesLoaded { request_id: u64, result: Result<FileList, String> },
  ModalClosed,
  ModalOpened,
  OpenSelectedFile,
  Quit,
  Refresh,
  Render,
  Resize(u16, u16),
  Resume,
  SelectNext,
  SelectPrevious,
  StartInputMode,
  SubmitLocation(String),
  Suspend,
  Tick,
}
