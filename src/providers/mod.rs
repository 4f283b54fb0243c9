//! Completion service client and model catalog

pub mod error;
pub mod models;
pub mod openai;

pub use error::ServiceError;
pub use models::{ensure_known_model, ModelCatalog, DEFAULT_MODEL, KNOWN_MODELS};
pub use openai::{CompletionRequest, OpenAIClient};
