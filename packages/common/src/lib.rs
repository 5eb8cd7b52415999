pub mod language;
pub mod submission;
pub mod submission_status;

pub use language::Language;
pub use submission_status::{SubmissionStatus, TestCaseStatus};
