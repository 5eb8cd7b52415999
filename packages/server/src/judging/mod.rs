//! Submission lifecycle: dispatch, result ingestion, verdict aggregation and contest scoring.

pub mod aggregate;
pub mod dispatch;
pub mod ingest;
pub mod scoring;
pub mod sweep;

pub use aggregate::{AggregationOutcome, aggregate_submission};
pub use dispatch::{NewSubmission, dispatch_submission};
pub use ingest::{CaseReport, IngestError, IngestOutcome, ingest_report};
pub use scoring::{FixedPointsPolicy, ScoreOutcome, ScoringContext, ScoringPolicy};

use sea_orm::DatabaseConnection;
use tracing::instrument;

/// What a single callback ended up doing.
#[derive(Debug)]
pub struct CallbackOutcome {
    pub ingest: IngestOutcome,
    pub aggregation: AggregationOutcome,
    /// Set only when this callback resolved the submission.
    pub score: Option<ScoreOutcome>,
}

/// Handle one test case report end to end.
///
/// Aggregation runs for duplicates too, so a callback retried after a crash between
/// the test case write and the verdict still resolves the submission. Scoring runs only
/// for the pass that wrote the verdict.
#[instrument(skip_all, fields(token = %report.token))]
pub async fn process_report(
    db: &DatabaseConnection,
    policy: &dyn ScoringPolicy,
    report: &CaseReport,
) -> Result<CallbackOutcome, IngestError> {
    let ingest = ingest_report(db, report).await?;
    let aggregation = aggregate_submission(db, ingest.submission_id()).await?;

    let score = match aggregation {
        AggregationOutcome::Finalized(ref sub) => {
            Some(scoring::record_contest_score(db, policy, sub).await?)
        }
        _ => None,
    };

    Ok(CallbackOutcome {
        ingest,
        aggregation,
        score,
    })
}
