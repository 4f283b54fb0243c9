//! Fixed prompt templates wrapped around a rendered directory tree.

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the rendered tree.
const TREE_SLOT: &str = "{dirtree}";

const HONE_TEMPLATE: &str = "We have to analyze a codebase in a directory with the following tree structure:
{dirtree}

Our goal at the end of our work is to generate high-level documentation about the code in this codebase.

Which files should we start by analyzing? For each file, please provide a list of topics you think that
file could pertain to.

Return your output as a list of files to analyze, along with expected topics:
- file_1,topic_1_1,...,topic_1_{n_1}
- file_2,topic_2_1,...,topic_2_{n_2}
- ...

Each file should be specified as a path relative to the root of the codebase.
";

const DESCRIBE_TEMPLATE: &str = "We are looking at a codebase in a directory with the following tree structure:
{dirtree}

Based only on the names and layout of its directories and files, describe this codebase.
List the main topics it deals with and, for each topic, the files or directories most likely
to implement it. Then list the likely entrypoints (binaries, scripts, main modules, public
APIs) and why you think each one is an entrypoint.

{format}
";

const DESCRIBE_TEXT_FORMAT: &str = "Return your output as plain text with two sections:
Topics:
- topic: path_1, path_2, ...
Entrypoints:
- path: reason";

const DESCRIBE_JSON_FORMAT: &str = "Return your output as a single JSON object and nothing else, shaped like:
{\"topics\": [{\"name\": \"...\", \"paths\": [\"...\"]}], \"entrypoints\": [{\"path\": \"...\", \"reason\": \"...\"}]}
All paths should be relative to the root of the codebase.";

/// Shape the describe workflow asks the model to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Which question is asked about the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Topic and entrypoint breakdown.
    Describe(OutputFormat),
    /// Prioritized `file,topic,...` list of files worth analyzing.
    Hone,
}

/// Embed a rendered tree into the template for `kind`.
pub fn compose_prompt(kind: PromptKind, rendered_tree: &str) -> String {
    let template = match kind {
        PromptKind::Hone => HONE_TEMPLATE.to_string(),
        PromptKind::Describe(format) => {
            let instructions = match format {
                OutputFormat::Text => DESCRIBE_TEXT_FORMAT,
                OutputFormat::Json => DESCRIBE_JSON_FORMAT,
            };
            DESCRIBE_TEMPLATE.replacen("{format}", instructions, 1)
        }
    };
    // The tree goes in last so braces inside file names are never treated as slots.
    template.replacen(TREE_SLOT, rendered_tree, 1)
}
