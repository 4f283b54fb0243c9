//! Build, render and ask: the end-to-end workflows over a directory.

pub mod timings;

use anyhow::Result;
use std::path::Path;

use crate::prompt::{compose_prompt, OutputFormat, PromptKind};
use crate::providers::OpenAIClient;
use crate::tree::{build_tree, render_tree, TreeOptions};

/// Walk `root` and render its outline.
pub fn analyze_directory(root: &Path, options: &TreeOptions) -> Result<String> {
    let tree = timings::timed("walk", || build_tree(root, options))?;
    Ok(timings::timed("render", || render_tree(&tree, root)))
}

/// The exact prompt that would be sent for `kind`, without sending it.
pub fn generate_prompt(root: &Path, options: &TreeOptions, kind: PromptKind) -> Result<String> {
    let rendered = analyze_directory(root, options)?;
    Ok(compose_prompt(kind, &rendered))
}

/// Send an already composed prompt and return the raw completion.
pub async fn complete_prompt(client: &OpenAIClient, model: &str, prompt: String) -> Result<String> {
    let request = client.request(model, prompt);
    let start = std::time::Instant::now();
    let result = client.complete(&request).await;
    timings::record("completion", start.elapsed().as_millis());
    result
}

/// Ask the model which files are worth analyzing first. The answer is the
/// model's free-form text, expected to look like `- file,topic,...` lines.
pub async fn hone(
    client: &OpenAIClient,
    model: &str,
    root: &Path,
    options: &TreeOptions,
) -> Result<String> {
    let prompt = generate_prompt(root, options, PromptKind::Hone)?;
    complete_prompt(client, model, prompt).await
}

/// Ask the model for the topics and entrypoints of the codebase.
pub async fn describe(
    client: &OpenAIClient,
    model: &str,
    root: &Path,
    options: &TreeOptions,
    format: OutputFormat,
) -> Result<String> {
    let prompt = generate_prompt(root, options, PromptKind::Describe(format))?;
    complete_prompt(client, model, prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ignore::IgnoreSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn prompt_contains_rendered_tree() {
        let td = TempDir::new().unwrap();
        let root = td.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git/HEAD"), "ref").unwrap();
        fs::write(root.join("main.py"), "").unwrap();

        let options = TreeOptions { ignores: IgnoreSet::for_root(root), ..Default::default() };
        let prompt = generate_prompt(root, &options, PromptKind::Hone).unwrap();
        assert!(prompt.contains("|- main.py"));
        assert!(!prompt.contains("HEAD"));
        assert!(!prompt.contains(".git"));
    }
}
