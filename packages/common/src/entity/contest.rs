use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Contest id on the upstream platform.
    #[sea_orm(unique)]
    pub external_id: i32,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub kind: String,
    pub phase: String,
    pub start_time: Option<DateTimeUtc>,
    pub duration: Option<i32>, // in minutes
    pub url: String,

    #[sea_orm(has_many, via = "problem_contest")]
    pub problems: HasMany<super::problem::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
