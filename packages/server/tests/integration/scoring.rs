use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::common::TestApp;
use server::entity::contest;

#[tokio::test]
async fn accepted_contest_submission_scores_once() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 2).await;
    let contest_id = app.create_running_contest().await;

    let id = app
        .submit_and_judge(7, problem_id, Some(contest_id), &["Accepted", "Accepted"])
        .await;

    let scores = app.scores().await;
    assert_eq!(scores.len(), 1);
    let score = &scores[0];
    assert_eq!(score.user_id, 7);
    assert_eq!(score.contest_id, contest_id);
    assert_eq!(score.problem_id, problem_id);
    assert_eq!(score.points, 100);
    assert_eq!(score.submission_id, id);
    assert_eq!(app.scoring_calls(), 1);
}

#[tokio::test]
async fn practice_submission_is_not_scored() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 1).await;

    app.submit_and_judge(7, problem_id, None, &["Accepted"])
        .await;

    assert!(app.scores().await.is_empty());
    assert_eq!(app.scoring_calls(), 0);
}

#[tokio::test]
async fn better_attempt_replaces_score() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 1).await;
    let contest_id = app.create_running_contest().await;

    app.submit_and_judge(7, problem_id, Some(contest_id), &["Wrong Answer"])
        .await;
    let scores = app.scores().await;
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].points, 0);

    let accepted = app
        .submit_and_judge(7, problem_id, Some(contest_id), &["Accepted"])
        .await;
    let scores = app.scores().await;
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].points, 100);
    assert_eq!(scores[0].submission_id, accepted);
}

#[tokio::test]
async fn worse_attempt_keeps_best_score() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 1).await;
    let contest_id = app.create_running_contest().await;

    let accepted = app
        .submit_and_judge(7, problem_id, Some(contest_id), &["Accepted"])
        .await;
    app.submit_and_judge(7, problem_id, Some(contest_id), &["Time Limit Exceeded"])
        .await;
    app.submit_and_judge(7, problem_id, Some(contest_id), &["Accepted"])
        .await;

    let scores = app.scores().await;
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].points, 100);
    assert_eq!(scores[0].submission_id, accepted);
    assert_eq!(app.scoring_calls(), 3);
}

#[tokio::test]
async fn scores_are_kept_per_user_and_problem() {
    let app = TestApp::spawn().await;
    let first = app.create_problem("sum", 1).await;
    let second = app.create_problem("product", 1).await;
    let contest_id = app.create_running_contest().await;

    app.submit_and_judge(1, first, Some(contest_id), &["Accepted"])
        .await;
    app.submit_and_judge(1, second, Some(contest_id), &["Accepted"])
        .await;
    app.submit_and_judge(2, first, Some(contest_id), &["Accepted"])
        .await;

    assert_eq!(app.scores().await.len(), 3);
}

#[tokio::test]
async fn submission_outside_window_is_not_scored() {
    let app = TestApp::spawn().await;
    let problem_id = app.create_problem("sum", 1).await;
    let contest_id = app.create_running_contest().await;

    let id = app.submit(7, problem_id, Some(contest_id)).await;

    // Window moved past the submission before its result came in.
    let c = contest::Entity::find_by_id(contest_id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    let mut active: contest::ActiveModel = c.into();
    active.start_time = Set(Utc::now() + Duration::minutes(5));
    active.end_time = Set(Utc::now() + Duration::hours(2));
    active.update(&app.db).await.unwrap();

    let token = app.tokens(id).await.remove(0);
    let res = app
        .callback(&token, "Accepted", Some("0.01"), Some(1))
        .await;
    assert_eq!(res.status, 200);

    assert_eq!(
        app.submission(id).await.status,
        common::SubmissionStatus::Accepted
    );
    assert!(app.scores().await.is_empty());
    assert_eq!(app.scoring_calls(), 0);
}
