//! Hidden test data and execution templates of problems.

mod error;
pub mod filesystem;

pub use error::ProblemStoreError;
pub use filesystem::FilesystemProblemStore;

use async_trait::async_trait;
use common::Language;

/// Marker in an execution template that is replaced by the user's code.
pub const CODE_PLACEHOLDER: &str = "user_code";

/// One hidden test case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemCase {
    pub input: String,
    pub expected_output: String,
}

/// Everything needed to dispatch a submission for one problem in one language.
#[derive(Clone, Debug)]
pub struct ProblemData {
    /// Execution template containing [`CODE_PLACEHOLDER`].
    pub template: String,
    /// Ordered test cases. Never empty.
    pub cases: Vec<ProblemCase>,
}

impl ProblemData {
    /// Substitute the user's code into the template.
    pub fn assemble(&self, code: &str) -> String {
        self.template.replacen(CODE_PLACEHOLDER, code, 1)
    }
}

#[async_trait]
pub trait ProblemStore: Send + Sync {
    async fn load(&self, slug: &str, language: Language)
    -> Result<ProblemData, ProblemStoreError>;
}
