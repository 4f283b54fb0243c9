use std::path::{is_separator, Path, MAIN_SEPARATOR};

use super::builder::TreeMapping;

pub const DEFAULT_INDENT: usize = 2;

const SEPARATOR: &str = "\n|\n";

/// Render the subtree at `base` with the default indent.
pub fn render_tree(tree: &TreeMapping, base: &Path) -> String {
    render_tree_with_indent(tree, base, DEFAULT_INDENT)
}

/// Render the subtree at `base` as a pipe-and-dash outline:
///
/// ```text
/// root/
/// |
/// |  root/src/
/// |  |
/// |  |- lib.rs
/// |
/// |- README.md
/// ```
///
/// Directories missing from the mapping (ignored during the walk) render as
/// nothing and are dropped from their parent's listing.
pub fn render_tree_with_indent(tree: &TreeMapping, base: &Path, indent: usize) -> String {
    let Some(node) = tree.get(base) else {
        return String::new();
    };

    let mut dirname = base.to_string_lossy().into_owned();
    if !dirname.ends_with(is_separator) {
        dirname.push(MAIN_SEPARATOR);
    }

    let prefix = format!("|{}", " ".repeat(indent));
    let mut parts = Vec::with_capacity(1 + node.subdirs.len() + node.files.len());
    parts.push(dirname);
    parts.extend(
        node.subdirs
            .iter()
            .map(|subdir| render_tree_with_indent(tree, subdir, indent))
            .filter(|rendered| !rendered.is_empty())
            .map(|rendered| indent_lines(&rendered, &prefix)),
    );
    parts.extend(node.files.iter().map(|file| format!("|- {file}")));

    parts.join(SEPARATOR)
}

/// Prefix every line that is not whitespace-only.
fn indent_lines(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
