#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall status of a submission.
///
/// A submission is `Pending` until every one of its test cases has been resolved,
/// then moves to `Accepted` or `Failed` exactly once and never changes again.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum SubmissionStatus {
    /// Waiting for test case results.
    #[default]
    #[serde(rename = "PENDING")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PENDING"))]
    Pending,
    /// Every test case was accepted.
    #[serde(rename = "AC")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AC"))]
    Accepted,
    /// At least one test case did not pass, or the submission could not be dispatched.
    #[serde(rename = "FAILED")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "FAILED"))]
    Failed,
}

impl SubmissionStatus {
    /// Returns true once the verdict is final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "AC",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single test case run.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum TestCaseStatus {
    /// Dispatched, no result received yet.
    #[default]
    #[serde(rename = "PENDING")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PENDING"))]
    Pending,
    #[serde(rename = "AC")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "AC"))]
    Accepted,
    /// Wrong answer, or any outcome the engine reports that has no dedicated variant.
    #[serde(rename = "FAILED")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "FAILED"))]
    Failed,
    #[serde(rename = "TLE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "TLE"))]
    TimeLimitExceeded,
    #[serde(rename = "MLE")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MLE"))]
    MemoryLimitExceeded,
    #[serde(rename = "RUNTIME_ERROR")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "RUNTIME_ERROR"))]
    RuntimeError,
    #[serde(rename = "COMPILATION_ERROR")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "COMPILATION_ERROR"))]
    CompilationError,
}

impl TestCaseStatus {
    /// Map the execution engine's free-form status description onto the closed set.
    ///
    /// Total: anything unrecognised becomes `Failed`. The result is never `Pending`.
    pub fn from_engine_description(description: &str) -> Self {
        match description.trim() {
            "Accepted" => Self::Accepted,
            "Wrong Answer" => Self::Failed,
            "Time Limit Exceeded" => Self::TimeLimitExceeded,
            "Memory Limit Exceeded" => Self::MemoryLimitExceeded,
            "Compilation Error" => Self::CompilationError,
            // Judge0 reports signals as e.g. "Runtime Error (SIGSEGV)".
            d if d.starts_with("Runtime Error") => Self::RuntimeError,
            _ => Self::Failed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Accepted => "AC",
            Self::Failed => "FAILED",
            Self::TimeLimitExceeded => "TLE",
            Self::MemoryLimitExceeded => "MLE",
            Self::RuntimeError => "RUNTIME_ERROR",
            Self::CompilationError => "COMPILATION_ERROR",
        }
    }
}

impl fmt::Display for TestCaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
