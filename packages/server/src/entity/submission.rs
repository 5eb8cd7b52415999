use common::SubmissionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    /// Platform language id.
    pub language_id: i32,

    /// Code as the user submitted it.
    #[sea_orm(column_type = "Text")]
    pub code: String,
    /// Execution template with the user's code substituted in.
    #[sea_orm(column_type = "Text")]
    pub full_code: String,

    /// Only ever moves PENDING -> AC | FAILED, via a conditional update.
    pub status: SubmissionStatus,
    pub time_used: Option<i64>,   // in milliseconds, summed over test cases
    pub memory_used: Option<i64>, // in kilobytes, summed over test cases

    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,

    #[sea_orm(has_many)]
    pub test_cases: HasMany<super::test_case::Entity>,

    pub problem_id: i32,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: HasOne<super::problem::Entity>,

    /// NULL for submissions outside a contest.
    pub contest_id: Option<i32>,
    #[sea_orm(belongs_to, from = "contest_id", to = "id")]
    pub contest: HasOne<super::contest::Entity>,

    pub created_at: DateTimeUtc,
    pub judged_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
