use anyhow::Result;

use super::openai::OpenAIClient;
use crate::config::ConfigError;

/// Models served by the completions endpoint.
pub const KNOWN_MODELS: &[&str] = &[
    "gpt-3.5-turbo-instruct",
    "gpt-3.5-turbo-instruct-0914",
    "davinci-002",
    "babbage-002",
    "text-davinci-003",
    "text-davinci-002",
    "code-davinci-002",
];

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Builtin,
    Remote,
}

/// Model identifiers a command may use, from the built-in list or fetched from
/// the service. Never cached across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<String>,
    source: CatalogSource,
}

impl ModelCatalog {
    pub fn builtin() -> Self {
        Self {
            models: KNOWN_MODELS.iter().map(|m| m.to_string()).collect(),
            source: CatalogSource::Builtin,
        }
    }

    pub fn from_models(models: Vec<String>) -> Self {
        Self { models, source: CatalogSource::Remote }
    }

    pub async fn fetch(client: &OpenAIClient) -> Result<Self> {
        Ok(Self::from_models(client.list_models().await?))
    }

    /// Built-in list, or the remote listing when `refresh` is set.
    pub async fn resolve(refresh: bool, client: &OpenAIClient) -> Result<Self> {
        if refresh {
            Self::fetch(client).await
        } else {
            Ok(Self::builtin())
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    pub fn ensure(&self, model: &str) -> Result<()> {
        if self.contains(model) {
            return Ok(());
        }
        Err(ConfigError::UnknownModel {
            model: model.to_string(),
            known: self.models.join(", "),
        }
        .into())
    }
}

/// Check `model` against the built-in list.
pub fn ensure_known_model(model: &str) -> Result<()> {
    ModelCatalog::builtin().ensure(model)
}
