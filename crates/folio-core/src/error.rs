use thiserror::Error;

/// Failures of a single completion call.
///
/// The widget controllers collapse every variant into one static message, so
/// the detail carried here only ever reaches the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure or non-success HTTP status.
    #[error("request failed: {0}")]
    Transport(String),

    /// The body did not carry `choices[0].message.content`.
    #[error("malformed response: {0}")]
    Parse(String),

    /// A request must carry at least one user message.
    #[error("request has no user message")]
    EmptyRequest,
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ApiError::Parse(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}
