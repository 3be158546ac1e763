mod catalog;
mod error;
mod source;

pub use catalog::{Catalog, builtin_articles, default_hubs, fetch_lesson, learning_paths, load_catalog};
pub use error::ContentError;
pub use source::{ContentSource, FsContentSource, HttpContentSource, source_from_config};
