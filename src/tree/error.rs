use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("root path is not a readable directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("failed to walk directory {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl TreeError {
    /// Wrap a walker error, keeping the offending path when the walker knows it.
    pub(crate) fn walk(root: &std::path::Path, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.to_path_buf());
        TreeError::Walk { path, source }
    }
}
