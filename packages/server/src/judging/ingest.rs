use chrono::Utc;
use common::TestCaseStatus;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use tracing::{debug, instrument};

use crate::entity::test_case;

/// A normalized per-test-case result reported by the execution service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseReport {
    pub token: String,
    pub status: TestCaseStatus,
    /// Milliseconds.
    pub time_used: Option<i32>,
    /// Kilobytes.
    pub memory_used: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The report moved the test case out of PENDING.
    Applied { submission_id: i32 },
    /// The test case had already been resolved; nothing was written.
    Duplicate { submission_id: i32 },
}

impl IngestOutcome {
    pub fn submission_id(&self) -> i32 {
        match *self {
            IngestOutcome::Applied { submission_id } | IngestOutcome::Duplicate { submission_id } => {
                submission_id
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unknown token '{0}'")]
    UnknownToken(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Record a test case result.
///
/// The write is conditional on the test case still being PENDING, so a redelivered
/// report never overwrites the first one. A `Pending` status in the report is ignored.
#[instrument(skip(conn, report), fields(token = %report.token, status = %report.status))]
pub async fn ingest_report<C: ConnectionTrait>(
    conn: &C,
    report: &CaseReport,
) -> Result<IngestOutcome, IngestError> {
    if report.status.is_terminal() {
        let result = test_case::Entity::update_many()
            .col_expr(test_case::Column::Status, Expr::value(report.status))
            .col_expr(test_case::Column::TimeUsed, Expr::value(report.time_used))
            .col_expr(test_case::Column::MemoryUsed, Expr::value(report.memory_used))
            .col_expr(test_case::Column::ResolvedAt, Expr::value(Some(Utc::now())))
            .filter(test_case::Column::Token.eq(report.token.as_str()))
            .filter(test_case::Column::Status.eq(TestCaseStatus::Pending))
            .exec(conn)
            .await?;

        if result.rows_affected > 0 {
            let submission_id = submission_id_for(conn, &report.token).await?;
            return Ok(IngestOutcome::Applied { submission_id });
        }
    }

    let submission_id = submission_id_for(conn, &report.token).await?;
    debug!(submission_id, "Test case already resolved, ignoring report");
    Ok(IngestOutcome::Duplicate { submission_id })
}

async fn submission_id_for<C: ConnectionTrait>(conn: &C, token: &str) -> Result<i32, IngestError> {
    test_case::Entity::find()
        .filter(test_case::Column::Token.eq(token))
        .one(conn)
        .await?
        .map(|tc| tc.submission_id)
        .ok_or_else(|| IngestError::UnknownToken(token.to_string()))
}
