pub mod error;

use anyhow::Result;
use std::path::Path;

pub use error::ConfigError;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Output budget for every completion request.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Settings for talking to the completion service. Resolved once at startup
/// and handed to the client; nothing reads the environment after that.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load `.env` from the working directory (if any), then read the process
    /// environment.
    pub fn from_env() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            load_dotenv(&cwd.join(".env"));
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. A missing or blank credential
    /// is a [`ConfigError::MissingCredential`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingCredential(API_KEY_ENV))?;

        let mut config = Config::new(api_key);
        if let Some(url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential(API_KEY_ENV).into());
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                name: BASE_URL_ENV,
                reason: format!("expected an http(s) URL, got '{}'", self.base_url),
            }
            .into());
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_tokens",
                reason: "must be positive".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn load_dotenv(path: &Path) {
    if !path.exists() {
        return;
    }
    match dotenvy::from_path(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to load .env"),
    }
}
