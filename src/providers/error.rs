use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request to {endpoint} failed")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response from completion API: {0}")]
    MalformedResponse(String),
}
