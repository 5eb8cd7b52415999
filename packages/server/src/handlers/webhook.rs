use axum::Json;
use axum::extract::State;
use tracing::{info, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::judging::{AggregationOutcome, IngestOutcome, process_report};
use crate::models::webhook::{CallbackPayload, WebhookResponse};
use crate::state::AppState;

/// Receive one test case result from the execution service.
#[utoipa::path(
    put,
    path = "/",
    tag = "Webhook",
    operation_id = "submissionWebhook",
    summary = "Test case result callback",
    description = "Called by the execution service once per test case. Redelivery of the same result is acknowledged without effect. Resolves the submission when its last test case reports.",
    request_body = CallbackPayload,
    responses(
        (status = 200, description = "Result recorded or already known", body = WebhookResponse),
        (status = 400, description = "Malformed payload (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Unknown token (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(token = %payload.token))]
pub async fn submission_webhook(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CallbackPayload>,
) -> Result<Json<WebhookResponse>, AppError> {
    let report = payload.into_report();
    let outcome = process_report(&state.db, state.scoring.as_ref(), &report).await?;

    if let AggregationOutcome::Finalized(ref sub) = outcome.aggregation {
        info!(submission_id = sub.id, status = %sub.status, "Verdict written");
    }

    let message = match outcome.ingest {
        IngestOutcome::Applied { .. } => "Test case updated",
        IngestOutcome::Duplicate { .. } => "Test case already resolved",
    };
    Ok(Json(WebhookResponse {
        message: message.into(),
    }))
}
