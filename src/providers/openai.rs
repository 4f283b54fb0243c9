//! OpenAI-compatible completions client

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::ServiceError;
use crate::config::Config;

/// Body of `POST {base}/completions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
}

pub struct OpenAIClient {
    client: Client,
    config: Config,
}

impl OpenAIClient {
    /// No request timeout is set; the remote service's own limits apply.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .user_agent(concat!("llemming/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Request for `model` using the configured token budget.
    pub fn request(&self, model: &str, prompt: String) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            prompt,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Send one completion request and return the first choice's text as-is.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let endpoint = format!("{}/completions", self.config.base_url);
        tracing::debug!(
            model = %request.model,
            prompt_chars = request.prompt.len(),
            max_tokens = request.max_tokens,
            "sending completion request"
        );

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|source| ServiceError::Request { endpoint: endpoint.clone(), source })?;

        let body = read_success_body(response, &endpoint).await?;

        #[derive(Deserialize)]
        struct CompletionResponse {
            choices: Vec<CompletionChoice>,
        }

        #[derive(Deserialize)]
        struct CompletionChoice {
            text: String,
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::MalformedResponse("response contains no choices".to_string()))?;

        tracing::debug!(completion_chars = choice.text.len(), "completion received");
        Ok(choice.text)
    }

    /// Ids from `GET {base}/models`, sorted.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let endpoint = format!("{}/models", self.config.base_url);
        let response = self
            .client
            .get(&endpoint)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|source| ServiceError::Request { endpoint: endpoint.clone(), source })?;

        let body = read_success_body(response, &endpoint).await?;

        #[derive(Deserialize)]
        struct ModelList {
            data: Vec<ModelEntry>,
        }

        #[derive(Deserialize)]
        struct ModelEntry {
            id: String,
        }

        let parsed: ModelList = serde_json::from_str(&body)
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;
        let mut ids: Vec<String> = parsed.data.into_iter().map(|m| m.id).collect();
        ids.sort();
        tracing::debug!(count = ids.len(), "fetched model list");
        Ok(ids)
    }
}

async fn read_success_body(response: reqwest::Response, endpoint: &str) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| ServiceError::Request { endpoint: endpoint.to_string(), source })?;
    if !status.is_success() {
        return Err(ServiceError::Api { status: status.as_u16(), body }.into());
    }
    Ok(body)
}
