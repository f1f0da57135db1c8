// Error types surfaced to the user

use thiserror::Error;

/// Input problems caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a blog topic!")]
    EmptyTopic,
    #[error("Please enter a valid word count!")]
    InvalidWordCount,
}

/// Terminal outcomes of a failed generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The backend answered with a non-2xx status.
    #[error("Error: {detail}")]
    Server { status: u16, detail: String },
    /// The request never completed or the success body could not be decoded.
    #[error("Error: Cannot connect to the API server. Please ensure the backend is running.")]
    Transport { reason: String },
}

impl GenerateError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}
