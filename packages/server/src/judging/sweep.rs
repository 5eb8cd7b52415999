use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use common::SubmissionStatus;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use tracing::{error, info, warn};

use super::aggregate::{Finalization, finalize_submission};
use crate::config::ReconciliationConfig;
use crate::entity::submission;

/// Periodically fail submissions that have been PENDING for too long.
pub async fn run_stuck_submission_sweep(db: DatabaseConnection, config: ReconciliationConfig) {
    info!(
        timeout_secs = config.stuck_timeout_secs,
        scan_interval_secs = config.scan_interval_secs,
        "Starting stuck submission sweep"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.scan_interval_secs));
    loop {
        interval.tick().await;

        if let Err(e) = sweep_stuck_submissions(&db, config.stuck_timeout_secs).await {
            error!(error = %e, "Stuck submission sweep failed");
        }
    }
}

/// One sweep pass. Returns how many submissions this pass failed.
///
/// Uses the same conditional transition as aggregation, so a verdict that lands
/// concurrently wins or loses cleanly.
pub async fn sweep_stuck_submissions(
    db: &DatabaseConnection,
    timeout_secs: u64,
) -> anyhow::Result<usize> {
    let threshold = i64::try_from(timeout_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .and_then(|timeout| Utc::now().checked_sub_signed(timeout))
        .with_context(|| format!("Stuck timeout of {timeout_secs} seconds is out of range"))?;

    let stuck: Vec<i32> = submission::Entity::find()
        .select_only()
        .column(submission::Column::Id)
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .filter(submission::Column::CreatedAt.lt(threshold))
        .into_tuple()
        .all(db)
        .await?;

    if stuck.is_empty() {
        return Ok(0);
    }

    let fin = Finalization::failed(format!(
        "No result from the execution service within {timeout_secs} seconds"
    ));

    let mut failed = 0;
    for submission_id in stuck {
        match finalize_submission(db, submission_id, &fin).await {
            Ok(true) => {
                warn!(submission_id, "Failed stuck submission");
                failed += 1;
            }
            Ok(false) => {}
            Err(e) => error!(submission_id, error = %e, "Failed to fail stuck submission"),
        }
    }

    Ok(failed)
}
