use chrono::Utc;
use common::{Language, SubmissionStatus, TestCaseStatus};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use tracing::{error, info, instrument};

use super::aggregate::{Finalization, finalize_submission};
use crate::entity::{submission, test_case};
use crate::error::AppError;
use crate::execution::{ExecutionRequest, ExecutionService};
use crate::problems::ProblemData;

/// A validated submission, ready to be sent out.
#[derive(Debug)]
pub struct NewSubmission {
    pub user_id: i32,
    pub problem_id: i32,
    pub contest_id: Option<i32>,
    pub language: Language,
    pub code: String,
}

/// Persist a submission as PENDING and send one run per test case to the execution service.
///
/// The submission row is committed before the execution service is called, so a failed
/// dispatch still leaves a FAILED record behind. Test case rows are written in one
/// transaction once every token is known.
#[instrument(skip_all, fields(user_id = new.user_id, problem_id = new.problem_id))]
pub async fn dispatch_submission(
    db: &DatabaseConnection,
    execution: &dyn ExecutionService,
    callback_url: &str,
    problem: &ProblemData,
    new: NewSubmission,
) -> Result<submission::Model, AppError> {
    let full_code = problem.assemble(&new.code);

    let sub = submission::ActiveModel {
        user_id: Set(new.user_id),
        language_id: Set(new.language.platform_id()),
        code: Set(new.code),
        full_code: Set(full_code.clone()),
        status: Set(SubmissionStatus::Pending),
        problem_id: Set(new.problem_id),
        contest_id: Set(new.contest_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let requests: Vec<ExecutionRequest> = problem
        .cases
        .iter()
        .map(|case| ExecutionRequest {
            language_id: new.language.engine_id(),
            source_code: full_code.clone(),
            stdin: case.input.clone(),
            expected_output: case.expected_output.clone(),
            callback_url: callback_url.to_string(),
        })
        .collect();

    let tokens = match execution.submit_batch(requests).await {
        Ok(tokens) => tokens,
        Err(e) => {
            fail_dispatch(db, sub.id, &format!("Dispatch failed: {e}")).await;
            return Err(AppError::dispatch(sub.id, &e));
        }
    };

    if let Err(e) = insert_test_cases(db, sub.id, tokens).await {
        fail_dispatch(db, sub.id, "Could not record dispatched test cases").await;
        return Err(e.into());
    }

    info!(
        submission_id = sub.id,
        test_cases = problem.cases.len(),
        "Submission dispatched"
    );
    Ok(sub)
}

async fn insert_test_cases(
    db: &DatabaseConnection,
    submission_id: i32,
    tokens: Vec<String>,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    let rows = tokens
        .into_iter()
        .enumerate()
        .map(|(i, token)| test_case::ActiveModel {
            index: Set(i as i32),
            token: Set(token),
            status: Set(TestCaseStatus::Pending),
            submission_id: Set(submission_id),
            created_at: Set(now),
            ..Default::default()
        });

    let txn = db.begin().await?;
    test_case::Entity::insert_many(rows)
        .exec_without_returning(&txn)
        .await?;
    txn.commit().await?;
    Ok(())
}

async fn fail_dispatch(db: &DatabaseConnection, submission_id: i32, message: &str) {
    if let Err(e) = finalize_submission(db, submission_id, &Finalization::failed(message)).await {
        error!(submission_id, error = %e, "Failed to mark undispatched submission as failed");
    }
}
