use chrono::Utc;
use common::{SubmissionStatus, TestCaseStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, info, instrument};

use crate::entity::{submission, test_case};

/// The parts of a test case row that feed the verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaseOutcome {
    pub status: TestCaseStatus,
    pub time_used: Option<i32>,
    pub memory_used: Option<i32>,
}

impl From<&test_case::Model> for CaseOutcome {
    fn from(m: &test_case::Model) -> Self {
        Self {
            status: m.status,
            time_used: m.time_used,
            memory_used: m.memory_used,
        }
    }
}

/// Final verdict and resource totals of a fully resolved submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aggregate {
    pub status: SubmissionStatus,
    pub time_used: i64,
    pub memory_used: i64,
}

/// Compute the verdict, or `None` while any case is still pending.
///
/// AC iff every case is AC. Missing time or memory counts as zero.
pub fn aggregate(cases: &[CaseOutcome]) -> Option<Aggregate> {
    if cases.is_empty() || cases.iter().any(|c| !c.status.is_terminal()) {
        return None;
    }

    let status = if cases.iter().all(|c| c.status.is_accepted()) {
        SubmissionStatus::Accepted
    } else {
        SubmissionStatus::Failed
    };

    Some(Aggregate {
        status,
        time_used: cases.iter().map(|c| i64::from(c.time_used.unwrap_or(0))).sum(),
        memory_used: cases
            .iter()
            .map(|c| i64::from(c.memory_used.unwrap_or(0)))
            .sum(),
    })
}

/// Values written by the PENDING -> terminal transition.
#[derive(Clone, Debug)]
pub struct Finalization {
    pub status: SubmissionStatus,
    pub time_used: Option<i64>,
    pub memory_used: Option<i64>,
    pub error_message: Option<String>,
}

impl From<Aggregate> for Finalization {
    fn from(a: Aggregate) -> Self {
        Self {
            status: a.status,
            time_used: Some(a.time_used),
            memory_used: Some(a.memory_used),
            error_message: None,
        }
    }
}

impl Finalization {
    /// A failure with no test case results behind it.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: SubmissionStatus::Failed,
            time_used: None,
            memory_used: None,
            error_message: Some(message.into()),
        }
    }
}

/// Move a submission out of PENDING.
///
/// A single conditional `UPDATE ... WHERE status = 'PENDING'`; returns `true` only for the
/// caller whose update took effect. Every other caller, concurrent or late, gets `false`.
pub async fn finalize_submission<C: ConnectionTrait>(
    conn: &C,
    submission_id: i32,
    fin: &Finalization,
) -> Result<bool, DbErr> {
    let result = submission::Entity::update_many()
        .col_expr(submission::Column::Status, Expr::value(fin.status))
        .col_expr(submission::Column::TimeUsed, Expr::value(fin.time_used))
        .col_expr(submission::Column::MemoryUsed, Expr::value(fin.memory_used))
        .col_expr(
            submission::Column::ErrorMessage,
            Expr::value(fin.error_message.clone()),
        )
        .col_expr(submission::Column::JudgedAt, Expr::value(Some(Utc::now())))
        .filter(submission::Column::Id.eq(submission_id))
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

#[derive(Debug)]
pub enum AggregationOutcome {
    /// Some test cases have not reported yet.
    Pending { remaining: usize },
    /// This pass wrote the verdict. Carries the submission as committed.
    Finalized(submission::Model),
    /// Everything resolved, but another pass (or the sweep) got there first.
    AlreadyFinal,
}

/// Resolve the submission if all of its test cases have reported.
#[instrument(skip(conn))]
pub async fn aggregate_submission<C: ConnectionTrait>(
    conn: &C,
    submission_id: i32,
) -> Result<AggregationOutcome, DbErr> {
    let cases: Vec<CaseOutcome> = test_case::Entity::find()
        .filter(test_case::Column::SubmissionId.eq(submission_id))
        .order_by_asc(test_case::Column::Index)
        .all(conn)
        .await?
        .iter()
        .map(CaseOutcome::from)
        .collect();

    let Some(result) = aggregate(&cases) else {
        let remaining = cases.iter().filter(|c| !c.status.is_terminal()).count();
        debug!(remaining, "Submission still pending");
        return Ok(AggregationOutcome::Pending { remaining });
    };

    if !finalize_submission(conn, submission_id, &result.into()).await? {
        debug!("Verdict already written by another pass");
        return Ok(AggregationOutcome::AlreadyFinal);
    }

    let model = submission::Entity::find_by_id(submission_id)
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("submission {submission_id}")))?;

    info!(
        status = %result.status,
        time_used = result.time_used,
        memory_used = result.memory_used,
        "Submission resolved"
    );

    Ok(AggregationOutcome::Finalized(model))
}
