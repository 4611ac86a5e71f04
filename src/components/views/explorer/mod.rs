pub mod content_view;
pub mod view;

mod file_item;
mod modal;

pub use view::ExplorerView;
