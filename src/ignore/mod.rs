//! Absolute-path ignore sets, optionally expanded from an ignore file of glob
//! patterns.

pub mod error;

use anyhow::Result;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub use error::IgnoreError;

/// Directory under the root that is ignored no matter what the ignore file says.
pub const ALWAYS_IGNORED: &str = ".git";

/// How ignore-file patterns are matched against paths under the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternMode {
    /// A pattern without glob syntax also matches at any depth (`name` => `**/name`).
    #[default]
    Recursive,
    /// Patterns only match relative to the root.
    Anchored,
}

/// Set of excluded paths. Every entry and every query is made absolute and
/// lexically normalized first, so `./secret`, `secret` and `/cwd/secret` all
/// refer to the same member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: HashSet<PathBuf>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty set plus the implicit `<root>/.git` entry.
    pub fn for_root(root: &Path) -> Self {
        let mut set = Self::new();
        set.insert(root.join(ALWAYS_IGNORED));
        set
    }

    /// Build the complete set for a traversal: `.git`, explicit paths and the
    /// expanded patterns of an optional ignore file. `follow_symlinks` must
    /// match the traversal so paths reached through links are expanded too.
    pub fn load(
        root: &Path,
        ignore_file: Option<&Path>,
        explicit: &[PathBuf],
        mode: PatternMode,
        follow_symlinks: bool,
    ) -> Result<Self> {
        let mut set = Self::for_root(root);
        for path in explicit {
            set.insert(path);
        }
        if let Some(file) = ignore_file {
            let patterns = read_ignore_file(file)?;
            let added = set.extend_with_patterns(root, &patterns, mode, follow_symlinks)?;
            tracing::debug!(file = %file.display(), patterns = patterns.len(), added, "expanded ignore file");
        }
        Ok(set)
    }

    pub fn insert(&mut self, path: impl AsRef<Path>) -> bool {
        self.paths.insert(absolutize(path.as_ref()))
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        if self.paths.is_empty() {
            return false;
        }
        self.paths.contains(&absolutize(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.paths.iter()
    }

    /// Walk `root` and add every path matched by `patterns`. Paths already in
    /// the set and matched directories are not descended into. Returns how many
    /// new paths were added.
    pub fn extend_with_patterns(
        &mut self,
        root: &Path,
        patterns: &[String],
        mode: PatternMode,
        follow_symlinks: bool,
    ) -> Result<usize> {
        let Some(globs) = build_pattern_set(patterns, mode)? else {
            return Ok(0);
        };

        let mut added = 0;
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(follow_symlinks)
            .into_iter();
        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|source| IgnoreError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                source,
            })?;
            if self.contains(entry.path()) {
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if globs.is_match(relative) {
                if self.insert(entry.path()) {
                    added += 1;
                }
                if entry.file_type().is_dir() {
                    walker.skip_current_dir();
                }
            }
        }
        Ok(added)
    }
}

impl<P: AsRef<Path>> FromIterator<P> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

/// One pattern per line; blank lines and `#` comments are skipped.
pub fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_ignore_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| IgnoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_patterns(&content))
}

/// Compile ignore patterns into a root-relative glob set. `*` never crosses a
/// path separator. Returns `None` when there is nothing to match.
pub fn build_pattern_set(patterns: &[String], mode: PatternMode) -> Result<Option<GlobSet>> {
    let mut builder = GlobSetBuilder::new();
    let mut any = false;
    for raw in patterns {
        let pattern = strip_anchors(raw);
        if pattern.is_empty() || pattern == "." {
            continue;
        }
        builder.add(compile(pattern)?);
        if mode == PatternMode::Recursive && !has_wildcard(pattern) {
            builder.add(compile(&format!("**/{pattern}"))?);
        }
        any = true;
    }
    if !any {
        return Ok(None);
    }
    let set = builder.build().map_err(|source| IgnoreError::Pattern {
        pattern: patterns.join(", "),
        source,
    })?;
    Ok(Some(set))
}

fn compile(pattern: &str) -> Result<globset::Glob, IgnoreError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| IgnoreError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn strip_anchors(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_start_matches('/').trim_end_matches('/')
}

fn has_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Absolute, lexically normalized form of `path`. Symlinks are not resolved.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
