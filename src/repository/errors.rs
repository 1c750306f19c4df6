use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The request was superseded or aborted before it settled.
    #[error("Request cancelled")]
    Cancelled,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {}", message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RepositoryError::Cancelled)
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if err.is_builder() {
            RepositoryError::Unexpected(format!("Invalid request: {err}"))
        } else if let Some(status) = err.status() {
            RepositoryError::Server {
                status: status.as_u16(),
                message: None,
            }
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
