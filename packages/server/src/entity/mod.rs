pub mod contest;
pub mod contest_score;
pub mod problem;
pub mod submission;
pub mod test_case;
