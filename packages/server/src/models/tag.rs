use common::entity::tag;
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "math")]
    pub name: String,
}

impl From<tag::Model> for TagResponse {
    fn from(m: tag::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}
