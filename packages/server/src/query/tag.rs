use common::entity::tag;
use sea_orm::*;

use crate::error::AppError;
use crate::models::tag::TagResponse;

pub async fn list_tags<C: ConnectionTrait>(db: &C) -> Result<Vec<TagResponse>, AppError> {
    let tags = tag::Entity::find()
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await?;
    Ok(tags.into_iter().map(Into::into).collect())
}
