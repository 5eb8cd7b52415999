use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::submission::{SubmissionPoll, SubmitRequest, SubmitResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{contest, problem, submission, test_case};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::judging::{NewSubmission, dispatch_submission};
use crate::models::submission::{submission_poll, validate_submit};
use crate::state::AppState;

/// Find a problem by ID or return 404.
async fn find_problem<C: ConnectionTrait>(db: &C, id: i32) -> Result<problem::Model, AppError> {
    problem::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem not found".into()))
}

/// Find a contest by ID or return 404.
async fn find_contest<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}

/// Submit a solution.
#[utoipa::path(
    post,
    path = "/",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit a solution to a problem",
    description = "Stores the submission as PENDING and dispatches one run per hidden test case to the execution service. Results arrive asynchronously; poll the submission for its verdict.",
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Submission dispatched", body = SubmitResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Problem or contest not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Execution service unavailable, submission failed (DISPATCH_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(user_id = auth_user.user_id, problem_id = payload.problem_id))]
pub async fn create_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let language = validate_submit(&payload, state.config.submission.max_code_size)?;

    let problem = find_problem(&state.db, payload.problem_id).await?;

    if let Some(contest_id) = payload.active_contest_id {
        let contest = find_contest(&state.db, contest_id).await?;
        if !contest.is_open_at(Utc::now()) {
            return Err(AppError::Validation("Contest is not running".into()));
        }
    }

    let data = state.problems.load(&problem.slug, language).await?;

    let sub = dispatch_submission(
        &state.db,
        state.execution.as_ref(),
        &state.config.execution.callback_url,
        &data,
        NewSubmission {
            user_id: auth_user.user_id,
            problem_id: problem.id,
            contest_id: payload.active_contest_id,
            language,
            code: payload.code,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            submission_id: sub.id,
        }),
    ))
}

/// Poll a submission.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get submission status",
    description = "Returns the current status of one of the caller's submissions with per test case progress. Time is in seconds, memory in kilobytes.",
    params(("id" = i32, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission status", body = SubmissionPoll),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn get_submission(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionPoll>, AppError> {
    // Both reads see one snapshot, so a resolved submission never pairs with stale cases.
    let txn = state
        .db
        .begin_with_config(Some(IsolationLevel::RepeatableRead), Some(AccessMode::ReadOnly))
        .await?;

    let sub = submission::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .filter(|s| s.user_id == auth_user.user_id)
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))?;

    let cases = test_case::Entity::find()
        .filter(test_case::Column::SubmissionId.eq(sub.id))
        .order_by_asc(test_case::Column::Index)
        .all(&txn)
        .await?;

    txn.commit().await?;

    Ok(Json(submission_poll(&sub, &cases)))
}
