use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Best contest result per (user, contest, problem).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest_score")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "user_contest_problem")]
    pub user_id: i32,
    #[sea_orm(unique_key = "user_contest_problem")]
    pub contest_id: i32,
    #[sea_orm(unique_key = "user_contest_problem")]
    pub problem_id: i32,

    pub points: i32,
    /// Submission that earned `points`.
    pub submission_id: i32,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
