use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub start_time: DateTimeUtc,
    pub end_time: DateTimeUtc,

    #[sea_orm(has_many)]
    pub submissions: HasMany<super::submission::Entity>,

    pub created_at: DateTimeUtc,
}

impl Model {
    /// Whether `at` falls inside the contest window (inclusive on both ends).
    pub fn is_open_at(&self, at: DateTimeUtc) -> bool {
        self.start_time <= at && at <= self.end_time
    }
}

impl ActiveModelBehavior for ActiveModel {}
