//! Render a codebase's directory tree and hand it to a language model to find
//! out what the codebase is about.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory traversal, filtering and outline rendering
pub mod tree;

/// Absolute-path ignore sets and ignore-file pattern expansion
pub mod ignore;

/// Prompt templates for the describe and hone workflows
pub mod prompt;

/// Completion service client and model catalog
pub mod providers;

/// Credential and endpoint configuration
pub mod config;

/// End-to-end workflows and stage timings
pub mod analysis;

/// Command-line surface
pub mod cli;

pub use analysis::{analyze_directory, describe, generate_prompt, hone};
pub use config::{Config, ConfigError};
pub use ignore::{IgnoreError, IgnoreSet, PatternMode};
pub use prompt::{compose_prompt, OutputFormat, PromptKind};
pub use providers::{ModelCatalog, OpenAIClient, ServiceError};
pub use tree::{build_tree, render_tree, DirectoryNode, ExtensionFilter, TreeError, TreeMapping, TreeOptions};
