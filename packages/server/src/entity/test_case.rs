use common::TestCaseStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One dispatched run of a submission against one hidden test case.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "test_case")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Position of the test case within the problem's ordered list.
    pub index: i32,
    /// Tracking token handed out by the execution service; callbacks are matched on it.
    #[sea_orm(unique)]
    pub token: String,

    pub status: TestCaseStatus,
    pub time_used: Option<i32>,   // in milliseconds
    pub memory_used: Option<i32>, // in kilobytes

    pub submission_id: i32,
    #[sea_orm(belongs_to, from = "submission_id", to = "id")]
    pub submission: HasOne<super::submission::Entity>,

    pub created_at: DateTimeUtc,
    pub resolved_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
