use std::collections::HashSet;
use std::path::Path;

/// Allow-list of file extensions. Every entry is stored with its leading dot,
/// so `"py"` and `".py"` describe the same filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .filter_map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        Self { extensions }
    }

    /// Build a filter only when at least one extension was given.
    pub fn from_args(extensions: &[String]) -> Option<Self> {
        let filter = Self::new(extensions);
        if filter.is_empty() {
            None
        } else {
            Some(filter)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn contains(&self, extension: &str) -> bool {
        normalize_extension(extension)
            .map(|ext| self.extensions.contains(&ext))
            .unwrap_or(false)
    }

    /// Whether a file name passes the filter. Only the final extension counts
    /// and names without one (including dotfiles such as `.bashrc`) never match.
    pub fn matches(&self, file_name: &Path) -> bool {
        match file_name.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.extensions.contains(&format!(".{ext}")),
            None => false,
        }
    }
}

/// `"py"` -> `".py"`, `".py"` -> `".py"`, blank -> `None`.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    if trimmed.starts_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!(".{trimmed}"))
    }
}
