use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::tag::TagResponse;
use crate::query;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Tags",
    operation_id = "listTags",
    summary = "List all tags",
    description = "Returns every known tag ordered by name.",
    responses(
        (status = 200, description = "All tags", body = Vec<TagResponse>),
        (status = 500, description = "Internal error (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, AppError> {
    Ok(Json(query::tag::list_tags(&state.db).await?))
}
