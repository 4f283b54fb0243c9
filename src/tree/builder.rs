use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::TreeError;
use super::filter::ExtensionFilter;
use crate::ignore::IgnoreSet;

/// Immediate children of one traversed directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    pub subdirs: Vec<PathBuf>,
    pub files: Vec<String>,
}

/// Directory path -> children, covering every directory the walk kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeMapping {
    root: PathBuf,
    nodes: HashMap<PathBuf, DirectoryNode>,
}

impl TreeMapping {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            nodes: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, node: DirectoryNode) -> Option<DirectoryNode> {
        self.nodes.insert(path.into(), node)
    }

    pub fn get(&self, path: &Path) -> Option<&DirectoryNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &DirectoryNode)> {
        self.nodes.iter()
    }

    /// Number of file entries across all directories.
    pub fn file_count(&self) -> usize {
        self.nodes.values().map(|node| node.files.len()).sum()
    }
}

/// Inputs to a traversal.
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    pub extensions: Option<ExtensionFilter>,
    pub ignores: IgnoreSet,
    pub follow_symlinks: bool,
    /// Enumerate children by name instead of filesystem order.
    pub sort: bool,
}

/// Walk `root` top-down and record every kept directory with its children.
///
/// Ignored directories are pruned as soon as they are seen, so nothing below
/// them is visited. Without `follow_symlinks`, a symlink to a directory is
/// listed as a subdirectory but never entered, leaving it without a node.
pub fn build_tree(root: &Path, options: &TreeOptions) -> Result<TreeMapping> {
    if !root.is_dir() {
        return Err(TreeError::InvalidRoot(root.to_path_buf()).into());
    }

    let mut mapping = TreeMapping::new(root);
    let mut walker = WalkDir::new(root).follow_links(options.follow_symlinks);
    if options.sort {
        walker = walker.sort_by_file_name();
    }
    let mut entries = walker.into_iter();

    while let Some(entry) = entries.next() {
        let entry = entry.map_err(|source| TreeError::walk(root, source))?;
        let path = entry.path();
        let is_dir = entry.file_type().is_dir();

        if options.ignores.contains(path) {
            tracing::trace!(path = %path.display(), "ignored");
            if is_dir {
                entries.skip_current_dir();
            }
            continue;
        }

        if is_dir {
            mapping.insert(path, DirectoryNode::default());
        }
        if entry.depth() == 0 {
            continue;
        }

        let Some(parent) = path.parent().and_then(|p| mapping.nodes.get_mut(p)) else {
            continue;
        };
        if is_dir || (entry.path_is_symlink() && path.is_dir()) {
            parent.subdirs.push(path.to_path_buf());
        } else {
            let name = entry.file_name();
            let keep = options
                .extensions
                .as_ref()
                .map_or(true, |filter| filter.matches(Path::new(name)));
            if keep {
                parent.files.push(name.to_string_lossy().into_owned());
            }
        }
    }

    tracing::debug!(
        root = %root.display(),
        directories = mapping.len(),
        files = mapping.file_count(),
        "built directory tree"
    );
    Ok(mapping)
}
