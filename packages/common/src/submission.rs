//! Wire types shared by the server and its clients.

use serde::{Deserialize, Serialize};

use crate::{SubmissionStatus, TestCaseStatus};

/// Request body for submitting a solution.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// The user's code. Substituted into the problem's execution template.
    #[schema(example = "def solve(a, b):\n    return a + b")]
    pub code: String,
    #[schema(example = 1)]
    pub problem_id: i32,
    /// Platform language id: 1 = python, 2 = javascript, 3 = cpp.
    #[schema(example = 1)]
    pub language_id: i32,
    /// Contest the submission counts towards, if any.
    #[serde(default)]
    pub active_contest_id: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[schema(example = 42)]
    pub submission_id: i32,
}

/// Current state of a submission as seen by a polling client.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPoll {
    #[schema(example = 42)]
    pub id: i32,
    pub status: SubmissionStatus,
    /// Total execution time in seconds, once resolved.
    #[schema(example = 0.03)]
    pub time: Option<f64>,
    /// Total memory in kilobytes, once resolved.
    #[schema(example = 2200)]
    pub memory: Option<i64>,
    pub test_cases: Vec<TestCasePoll>,
}

/// Per test case progress. Never carries hidden inputs or expected outputs.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCasePoll {
    #[schema(example = 0)]
    pub index: i32,
    pub status: TestCaseStatus,
    /// Execution time in seconds, if reported.
    pub time: Option<f64>,
    /// Memory in kilobytes, if reported.
    pub memory: Option<i32>,
}

/// Convert a stored millisecond count to the seconds value clients see.
pub fn millis_to_seconds(millis: i64) -> f64 {
    millis as f64 / 1000.0
}
