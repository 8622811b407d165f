use thiserror::Error;

/// Top-level error type for hwbot.
#[derive(Debug, Error)]
pub enum HwError {
    /// The review API could not be reached or answered with a non-success status.
    #[error("request error: {0}")]
    Request(String),

    /// A value in the API response has the wrong shape.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A required key is absent from the API response or a submission record.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// A submission carries a status code with no known verdict.
    #[error("unexpected status: {0}")]
    UnexpectedStatus(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),
}
