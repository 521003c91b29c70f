use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::contest::*;
use crate::models::problem::{ContestProblemListQuery, ProblemListResponse};
use crate::query;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Contests",
    operation_id = "listContests",
    summary = "List contests with filters and pagination",
    description = "Returns contests ordered by start time, newest first. Filters are AND-combined. `min_problems`/`max_problems` count linked problems; a contest without problems counts as 0.",
    params(ContestListQuery),
    responses(
        (status = 200, description = "List of contests", body = ContestListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params))]
pub async fn list_contests(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ContestListQuery>,
) -> Result<Json<ContestListResponse>, AppError> {
    Ok(Json(query::contest::list_contests(&state.db, &params).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Contests",
    operation_id = "getContest",
    summary = "Get a contest by ID",
    description = "Returns the contest with its problems ordered by index.",
    params(("id" = i32, Path, description = "Contest ID")),
    responses(
        (status = 200, description = "Contest details", body = ContestResponse),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_contest(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContestResponse>, AppError> {
    Ok(Json(query::contest::get_contest(&state.db, id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}/problems",
    tag = "Contests",
    operation_id = "listContestProblems",
    summary = "List the problems of a contest",
    description = "Returns the contest's problems ordered by rating ascending. A rating bound excludes unrated problems. Returns 404 only when the contest does not exist; no matches yields an empty page.",
    params(("id" = i32, Path, description = "Contest ID"), ContestProblemListQuery),
    responses(
        (status = 200, description = "Problems of the contest", body = ProblemListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Contest not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, params), fields(id))]
pub async fn list_contest_problems(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppQuery(params): AppQuery<ContestProblemListQuery>,
) -> Result<Json<ProblemListResponse>, AppError> {
    Ok(Json(
        query::problem::list_contest_problems(&state.db, id, &params).await?,
    ))
}
