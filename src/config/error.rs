use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("unknown model '{model}'. Known models: {known}")]
    UnknownModel { model: String, known: String },

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}
