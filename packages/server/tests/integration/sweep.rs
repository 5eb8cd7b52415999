use common::SubmissionStatus;

use crate::common::TestApp;
use server::judging::sweep::sweep_stuck_submissions;

#[tokio::test]
async fn stuck_submission_is_failed() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 2).await;
    let id = app.submit(1, problem_id, None).await;

    let failed = sweep_stuck_submissions(&app.db, 0).await.unwrap();
    assert_eq!(failed, 1);

    let sub = app.submission(id).await;
    assert_eq!(sub.status, SubmissionStatus::Failed);
    assert!(sub.error_message.is_some());
}

#[tokio::test]
async fn late_results_do_not_override_sweep() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 1).await;
    let id = app.submit(1, problem_id, None).await;

    sweep_stuck_submissions(&app.db, 0).await.unwrap();

    let token = app.tokens(id).await.remove(0);
    let res = app
        .callback(&token, "Accepted", Some("0.01"), Some(1))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(app.submission(id).await.status, SubmissionStatus::Failed);
}

#[tokio::test]
async fn recent_and_resolved_submissions_are_left_alone() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 1).await;
    let resolved = app
        .submit_and_judge(1, problem_id, None, &["Accepted"])
        .await;
    let recent = app.submit(1, problem_id, None).await;

    let failed = sweep_stuck_submissions(&app.db, 3600).await.unwrap();
    assert_eq!(failed, 0);
    assert_eq!(app.submission(recent).await.status, SubmissionStatus::Pending);

    let failed = sweep_stuck_submissions(&app.db, 0).await.unwrap();
    assert_eq!(failed, 1);
    assert_eq!(
        app.submission(resolved).await.status,
        SubmissionStatus::Accepted
    );
}

#[tokio::test]
async fn out_of_range_timeout_fails_nothing() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 1).await;
    let id = app.submit(1, problem_id, None).await;

    assert!(sweep_stuck_submissions(&app.db, u64::MAX).await.is_err());
    assert!(
        sweep_stuck_submissions(&app.db, i64::MAX as u64)
            .await
            .is_err()
    );
    assert_eq!(app.submission(id).await.status, SubmissionStatus::Pending);
}

#[tokio::test]
async fn sweep_fails_submission_whose_callback_was_rejected() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 2).await;
    let id = app.submit(1, problem_id, None).await;
    let tokens = app.tokens(id).await;

    let res = app
        .callback(&tokens[0], "Accepted", Some("0.01"), Some(1))
        .await;
    assert_eq!(res.status, 200);
    // The second result reached us under a token we had not stored yet.
    let res = app
        .callback("not-yet-stored", "Compilation Error", None, None)
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(app.submission(id).await.status, SubmissionStatus::Pending);

    assert_eq!(sweep_stuck_submissions(&app.db, 0).await.unwrap(), 1);
    assert_eq!(app.submission(id).await.status, SubmissionStatus::Failed);
}
