use common::TestCaseStatus;
use serde::{Deserialize, Serialize};

use crate::judging::CaseReport;

/// Engine status object. Only `description` is interpreted.
#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
pub struct CallbackStatus {
    #[schema(example = 3)]
    pub id: Option<i32>,
    #[schema(example = "Accepted")]
    pub description: String,
}

/// Execution time as reported by the engine: seconds, usually as a decimal string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum ReportedTime {
    Text(String),
    Number(f64),
}

impl ReportedTime {
    /// Whole milliseconds, or `None` if the value is not a usable duration.
    pub fn to_millis(&self) -> Option<i32> {
        let secs = match self {
            ReportedTime::Text(s) => s.trim().parse::<f64>().ok()?,
            ReportedTime::Number(n) => *n,
        };
        let millis = (secs * 1000.0).round();
        (millis.is_finite() && millis >= 0.0 && millis <= f64::from(i32::MAX))
            .then_some(millis as i32)
    }
}

/// Body of the per-test-case callback sent by the execution service.
///
/// Fields other than these (stdout, stderr, ...) are accepted and ignored.
#[derive(Clone, Debug, Deserialize, utoipa::ToSchema)]
pub struct CallbackPayload {
    #[schema(example = "d85cd024-1548-4165-96c7-7bc88673f194")]
    pub token: String,
    pub status: CallbackStatus,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "0.01")]
    pub time: Option<ReportedTime>,
    /// Kilobytes.
    #[serde(default)]
    #[schema(example = 1000)]
    pub memory: Option<i64>,
}

impl CallbackPayload {
    pub fn into_report(self) -> CaseReport {
        CaseReport {
            status: TestCaseStatus::from_engine_description(&self.status.description),
            time_used: self.time.as_ref().and_then(ReportedTime::to_millis),
            memory_used: self.memory.and_then(|m| i32::try_from(m).ok()).filter(|m| *m >= 0),
            token: self.token,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WebhookResponse {
    #[schema(example = "Test case updated")]
    pub message: String,
}
