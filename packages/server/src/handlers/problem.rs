use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::problem::*;
use crate::query;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Problems",
    operation_id = "listProblems",
    summary = "List problems with filters and pagination",
    description = "Returns problems ordered by rating descending, then id. `tags` is a comma-separated list and matches problems carrying all of them. Unrated problems are hidden unless `include_null_rating=true`.",
    params(ProblemListQuery),
    responses(
        (status = 200, description = "List of problems", body = ProblemListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params))]
pub async fn list_problems(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ProblemListQuery>,
) -> Result<Json<ProblemListResponse>, AppError> {
    Ok(Json(query::problem::list_problems(&state.db, &params).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Problems",
    operation_id = "getProblem",
    summary = "Get a problem by ID",
    description = "Returns the problem with its contests, tags, per-contest statistics and language codes.",
    params(("id" = i32, Path, description = "Problem ID")),
    responses(
        (status = 200, description = "Problem details", body = ProblemResponse),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProblemResponse>, AppError> {
    Ok(Json(query::problem::get_problem(&state.db, id).await?))
}
