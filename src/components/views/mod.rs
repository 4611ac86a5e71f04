pub mod error_view;
pub mod explorer;

pub use error_view::view::ErrorView;
pub use explorer::ExplorerView;
