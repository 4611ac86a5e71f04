pub mod content;
pub mod explorer;
pub mod file_list;
pub mod modal;

pub use content::{ContentKind, ContentVariant, FileContent};
pub use explorer::{ExplorerState, FetchStatus, ListRequest};
pub use file_list::FileList;
pub use modal::{ContentRequest, ModalController, ModalState};
