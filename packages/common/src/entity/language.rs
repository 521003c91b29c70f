use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Locales seeded on startup, as `(code, name)`.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] =
    &[("ru", "Russian"), ("en", "English"), ("kk", "Kazakh")];

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "language")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,

    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(has_many, via = "problem_language")]
    pub problems: HasMany<super::problem::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
