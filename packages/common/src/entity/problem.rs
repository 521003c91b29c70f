use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// `{external_contest_id}_{index}`, never changes once written.
    #[sea_orm(unique)]
    pub problem_uid: String,
    #[sea_orm(column_name = "problem_index")]
    pub index: String,
    pub name: String,
    /// NULL when the platform has not rated the problem yet.
    pub rating: Option<i32>,
    pub time_limit: Option<i32>,   // in milliseconds
    pub memory_limit: Option<i32>, // in megabytes
    pub url: String,

    #[sea_orm(has_many, via = "problem_contest")]
    pub contests: HasMany<super::contest::Entity>,

    #[sea_orm(has_many, via = "problem_tag")]
    pub tags: HasMany<super::tag::Entity>,

    #[sea_orm(has_many, via = "problem_language")]
    pub languages: HasMany<super::language::Entity>,

    #[sea_orm(has_many)]
    pub statistics: HasMany<super::problem_statistics::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
