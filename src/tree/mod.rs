//! Directory traversal into a path-to-children mapping and its text rendering

pub mod builder;
pub mod error;
pub mod filter;
pub mod render;

pub use builder::{build_tree, DirectoryNode, TreeMapping, TreeOptions};
pub use error::TreeError;
pub use filter::{normalize_extension, ExtensionFilter};
pub use render::{render_tree, render_tree_with_indent, DEFAULT_INDENT};
