use common::Language;
use common::submission::{SubmissionPoll, SubmitRequest, TestCasePoll, millis_to_seconds};

use crate::entity::{submission, test_case};
use crate::error::AppError;

/// Check a submit request before anything is loaded or stored.
///
/// Returns the resolved language.
pub fn validate_submit(req: &SubmitRequest, max_code_size: usize) -> Result<Language, AppError> {
    let language = Language::from_platform_id(req.language_id)
        .ok_or_else(|| AppError::Validation(format!("Unknown language id {}", req.language_id)))?;

    if req.code.trim().is_empty() {
        return Err(AppError::Validation("Code must not be empty".into()));
    }
    if req.code.len() > max_code_size {
        return Err(AppError::Validation(format!(
            "Code exceeds maximum size of {max_code_size} bytes"
        )));
    }

    Ok(language)
}

/// Poll view of a submission. `cases` must be ordered by index.
pub fn submission_poll(sub: &submission::Model, cases: &[test_case::Model]) -> SubmissionPoll {
    SubmissionPoll {
        id: sub.id,
        status: sub.status,
        time: sub.time_used.map(millis_to_seconds),
        memory: sub.memory_used,
        test_cases: cases
            .iter()
            .map(|tc| TestCasePoll {
                index: tc.index,
                status: tc.status,
                time: tc.time_used.map(|ms| millis_to_seconds(i64::from(ms))),
                memory: tc.memory_used,
            })
            .collect(),
    }
}
