//! Command-line interface for llemming.
//!
//! Credentials and model names are checked before any directory is walked, so
//! a misconfigured run fails without touching the filesystem or the network.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis;
use crate::config::Config;
use crate::ignore::{IgnoreSet, PatternMode};
use crate::prompt::{compose_prompt, OutputFormat, PromptKind};
use crate::providers::{ensure_known_model, ModelCatalog, OpenAIClient, DEFAULT_MODEL};
use crate::tree::{ExtensionFilter, TreeError, TreeOptions};

#[derive(Parser, Debug)]
#[command(
    name = "llemming",
    version = crate::VERSION,
    about = "Describe a codebase from its directory tree using a language model",
    disable_version_flag = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show llemming version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Log debug output to stderr
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a directory and describe its contents
    #[command(name = "analyzedir")]
    AnalyzeDir {
        #[command(flatten)]
        tree: TreeArgs,

        /// Ask the model for topics and entrypoints instead of printing the tree
        #[arg(long)]
        describe: bool,

        #[command(flatten)]
        model: ModelArgs,

        /// Answer format requested from the model with --describe
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Ask the model which files should be analyzed first
    Hone {
        #[command(flatten)]
        tree: TreeArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Print the prompt instead of sending it
        #[arg(long, conflicts_with = "refresh_models")]
        prompt_only: bool,
    },

    /// List model identifiers accepted by --model
    Models {
        /// Fetch the list from the service instead of using the built-in one
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Directory to analyze
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Only list files with these extensions (with or without the leading dot)
    #[arg(short = 'e', long = "extension", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Path to leave out, with everything beneath it
    #[arg(short = 'x', long = "ignore", value_name = "PATH")]
    pub ignore: Vec<PathBuf>,

    /// File of glob patterns (one per line) to leave out, relative to --dir
    #[arg(short = 'i', long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Match ignore-file patterns only from the root, never at any depth
    #[arg(long)]
    pub anchored: bool,

    /// Set this flag to follow symbolic links to directories
    #[arg(short, long)]
    pub symlinks: bool,

    /// List directory entries by name instead of filesystem order
    #[arg(long)]
    pub sort: bool,
}

impl TreeArgs {
    /// Resolve filters into traversal options. Expanding the ignore file walks
    /// the root, so this must run after configuration checks.
    pub fn options(&self) -> Result<TreeOptions> {
        if !self.dir.is_dir() {
            return Err(TreeError::InvalidRoot(self.dir.clone()).into());
        }
        let mode = if self.anchored {
            PatternMode::Anchored
        } else {
            PatternMode::Recursive
        };
        let ignores = IgnoreSet::load(
            &self.dir,
            self.ignore_file.as_deref(),
            &self.ignore,
            mode,
            self.symlinks,
        )?;
        Ok(TreeOptions {
            extensions: ExtensionFilter::from_args(&self.extensions),
            ignores,
            follow_symlinks: self.symlinks,
            sort: self.sort,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Completion model to use
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Validate --model against the service's model list instead of the built-in one
    #[arg(long)]
    pub refresh_models: bool,
}

/// Credential first, then the model name, and only then a client.
async fn connect(model: &ModelArgs) -> Result<OpenAIClient> {
    let config = Config::from_env()?;
    let client = OpenAIClient::new(config)?;
    let catalog = ModelCatalog::resolve(model.refresh_models, &client).await?;
    catalog.ensure(&model.model)?;
    Ok(client)
}

/// Execute a parsed command and return what should be printed to stdout.
pub async fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::AnalyzeDir { tree, describe, model, format } => {
            if !describe {
                let options = tree.options()?;
                return analysis::analyze_directory(&tree.dir, &options);
            }
            let client = connect(&model).await?;
            let options = tree.options()?;
            analysis::describe(&client, &model.model, &tree.dir, &options, format).await
        }
        Commands::Hone { tree, model, prompt_only } => {
            if prompt_only {
                ensure_known_model(&model.model)?;
                let options = tree.options()?;
                let rendered = analysis::analyze_directory(&tree.dir, &options)?;
                return Ok(compose_prompt(PromptKind::Hone, &rendered));
            }
            let client = connect(&model).await?;
            let options = tree.options()?;
            analysis::hone(&client, &model.model, &tree.dir, &options).await
        }
        Commands::Models { refresh } => {
            let catalog = if refresh {
                let client = OpenAIClient::new(Config::from_env()?)?;
                ModelCatalog::fetch(&client).await?
            } else {
                ModelCatalog::builtin()
            };
            Ok(catalog.models().join("\n"))
        }
    }
}
