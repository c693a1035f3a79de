// Export our modules for use in binaries and tests
pub mod config;
pub mod detail;
pub mod domain;
pub mod export;
pub mod stations;
pub mod sunburst;
pub mod table;
pub mod taxonomy;

pub use domain::{ClassificationNode, NodePath};
pub use taxonomy::TAXONOMY;
