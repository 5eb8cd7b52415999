use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Execution service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Execution service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response from execution service: {0}")]
    Malformed(String),

    #[error("Expected {expected} tracking tokens, got {actual}")]
    TokenCount { expected: usize, actual: usize },
}
