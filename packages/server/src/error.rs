use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::execution::ExecutionError;
use crate::judging::IngestError;
use crate::problems::ProblemStoreError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `NOT_FOUND`, `DISPATCH_FAILED`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Unknown language id 9")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    TokenMissing,
    TokenInvalid,
    NotFound(String),
    /// The execution service refused or garbled the batch; the submission was failed.
    DispatchFailed {
        submission_id: i32,
        reason: String,
    },
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_MISSING",
                    message: "Authentication required".into(),
                },
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    code: "TOKEN_INVALID",
                    message: "Invalid or expired token".into(),
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::DispatchFailed {
                submission_id,
                reason,
            } => {
                tracing::warn!(submission_id, reason = %reason, "Dispatch failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "DISPATCH_FAILED",
                        message: format!(
                            "Submission {submission_id} could not be sent for execution"
                        ),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<ProblemStoreError> for AppError {
    fn from(err: ProblemStoreError) -> Self {
        match err {
            ProblemStoreError::NotFound(slug) => {
                tracing::warn!(slug = %slug, "Problem files missing");
                AppError::NotFound("Problem not found".into())
            }
            ProblemStoreError::NoTestCases(_) => {
                AppError::Validation("Problem has no test cases".into())
            }
            ProblemStoreError::MissingTemplate { language, .. } => {
                AppError::Validation(format!("Problem does not support {language}"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnknownToken(token) => {
                tracing::warn!(token = %token, "Callback for unknown token");
                AppError::NotFound("Test case not found".into())
            }
            IngestError::Db(e) => e.into(),
        }
    }
}

impl AppError {
    pub fn dispatch(submission_id: i32, err: &ExecutionError) -> Self {
        AppError::DispatchFailed {
            submission_id,
            reason: err.to_string(),
        }
    }
}
