use thiserror::Error;

/// Failures at the backend boundary. Every variant is caught at the
/// command layer and rendered; nothing is retried automatically except
/// the explicitly configured live-stream reconnect. Live-stream
/// failures are not errors to callers; they surface as
/// `registry::ConnectionState`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx but the body did not match the contract.
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("invalid backend url '{0}': expected http:// or https://")]
    InvalidBackendUrl(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
