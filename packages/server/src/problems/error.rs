use common::Language;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemStoreError {
    #[error("Problem '{0}' not found")]
    NotFound(String),

    #[error("Problem '{slug}' has no template for {language}")]
    MissingTemplate { slug: String, language: Language },

    #[error("Template of problem '{0}' has no code placeholder")]
    MissingPlaceholder(String),

    #[error("Problem '{0}' has no test cases")]
    NoTestCases(String),

    #[error("Problem '{slug}' has no expected output for input '{file}'")]
    MissingOutput { slug: String, file: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
