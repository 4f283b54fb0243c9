use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("cannot read ignore file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ignore pattern '{pattern}'")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to expand ignore patterns under {}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
