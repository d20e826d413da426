use thiserror::Error;

/// Failures talking to the upstream recipe API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Recipe API returned status {0}")]
    Status(u16),

    #[error("Malformed recipe API response: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    /// Whether a retry could plausibly succeed. Transport failures and 5xx
    /// responses qualify; client errors and unparseable payloads do not.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status(code) => *code >= 500,
            ApiError::MalformedResponse(_) => false,
        }
    }
}
