use chrono::{DateTime, Utc};
use common::SubmissionStatus;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Set};
use tracing::{debug, info, instrument};

use crate::config::ScoringConfig;
use crate::entity::{contest, contest_score, submission};

/// What a scoring policy gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext {
    pub user_id: i32,
    pub problem_id: i32,
    pub contest_id: i32,
    pub contest_start: DateTime<Utc>,
    pub contest_end: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

/// Turns a resolved contest submission into points.
///
/// Can be used as `Arc<dyn ScoringPolicy>`.
pub trait ScoringPolicy: Send + Sync {
    fn points(&self, ctx: &ScoringContext) -> i32;
}

/// Flat points by verdict.
#[derive(Debug, Clone)]
pub struct FixedPointsPolicy {
    pub accepted_points: i32,
    pub failed_points: i32,
}

impl From<&ScoringConfig> for FixedPointsPolicy {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            accepted_points: config.accepted_points,
            failed_points: config.failed_points,
        }
    }
}

impl ScoringPolicy for FixedPointsPolicy {
    fn points(&self, ctx: &ScoringContext) -> i32 {
        match ctx.status {
            SubmissionStatus::Accepted => self.accepted_points,
            _ => self.failed_points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Not a contest submission.
    NoContest,
    /// Submitted outside the contest window.
    OutsideWindow,
    /// The row now holds these points.
    Recorded { points: i32 },
    /// An existing row already held at least as many points.
    Unchanged,
}

/// Record the contest result of a submission that has just been resolved.
///
/// One row per (user, contest, problem). An existing row is only replaced by strictly
/// higher points, so replays and worse later attempts leave it untouched.
#[instrument(skip_all, fields(submission_id = sub.id))]
pub async fn record_contest_score<C: ConnectionTrait>(
    conn: &C,
    policy: &dyn ScoringPolicy,
    sub: &submission::Model,
) -> Result<ScoreOutcome, DbErr> {
    let Some(contest_id) = sub.contest_id else {
        return Ok(ScoreOutcome::NoContest);
    };

    let contest = contest::Entity::find_by_id(contest_id)
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("contest {contest_id}")))?;

    if !contest.is_open_at(sub.created_at) {
        debug!(contest_id, "Submission outside contest window, not scored");
        return Ok(ScoreOutcome::OutsideWindow);
    }

    let points = policy.points(&ScoringContext {
        user_id: sub.user_id,
        problem_id: sub.problem_id,
        contest_id,
        contest_start: contest.start_time,
        contest_end: contest.end_time,
        submitted_at: sub.created_at,
        status: sub.status,
    });

    let row = contest_score::ActiveModel {
        user_id: Set(sub.user_id),
        contest_id: Set(contest_id),
        problem_id: Set(sub.problem_id),
        points: Set(points),
        submission_id: Set(sub.id),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = contest_score::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([
                contest_score::Column::UserId,
                contest_score::Column::ContestId,
                contest_score::Column::ProblemId,
            ])
            .update_columns([
                contest_score::Column::Points,
                contest_score::Column::SubmissionId,
                contest_score::Column::UpdatedAt,
            ])
            .action_and_where(Expr::cust(
                r#""contest_score"."points" < "excluded"."points""#,
            ))
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await;

    match result {
        Ok(n) if n > 0 => {
            info!(contest_id, points, "Contest score recorded");
            Ok(ScoreOutcome::Recorded { points })
        }
        Ok(_) | Err(DbErr::RecordNotInserted) => {
            debug!(contest_id, points, "Existing contest score kept");
            Ok(ScoreOutcome::Unchanged)
        }
        Err(e) => Err(e),
    }
}
