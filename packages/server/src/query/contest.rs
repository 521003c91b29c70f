use std::collections::HashMap;

use common::entity::{contest, problem, problem_contest};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, Func, Query as SeaQuery, SelectStatement};
use sea_orm::*;

use super::name_contains;
use crate::error::AppError;
use crate::models::contest::{ContestListItem, ContestListQuery, ContestListResponse, ContestResponse};
use crate::models::shared::Window;

/// Contest ids grouped over `problem_contest` whose problem count satisfies `having`.
fn contests_by_problem_count(having: impl FnOnce(Expr) -> Expr) -> SelectStatement {
    SeaQuery::select()
        .column(problem_contest::Column::ContestId)
        .from(problem_contest::Entity)
        .group_by_col(problem_contest::Column::ContestId)
        .and_having(having(Expr::expr(Func::count(Expr::col(
            problem_contest::Column::ProblemId,
        )))))
        .to_owned()
}

pub fn contest_filter(query: &ContestListQuery) -> Condition {
    let mut cond = Condition::all();

    if let Some(name) = name_contains(contest::Column::Name, query.name.as_deref()) {
        cond = cond.add(name);
    }
    if let Some(ref kind) = query.contest_type {
        cond = cond.add(contest::Column::Kind.eq(kind.as_str()));
    }
    if let Some(ref phase) = query.phase {
        cond = cond.add(contest::Column::Phase.eq(phase.as_str()));
    }
    if let Some(min) = query.min_duration {
        cond = cond.add(contest::Column::Duration.gte(min));
    }
    if let Some(max) = query.max_duration {
        cond = cond.add(contest::Column::Duration.lte(max));
    }
    if let Some(from) = query.start_time_from {
        cond = cond.add(contest::Column::StartTime.gte(from));
    }
    if let Some(to) = query.start_time_to {
        cond = cond.add(contest::Column::StartTime.lte(to));
    }

    // Contests without links never appear in the grouped count, so "at least"
    // is an IN and "at most" is a NOT IN over the complement.
    if let Some(min) = query.min_problems.filter(|&min| min > 0) {
        cond = cond.add(
            contest::Column::Id.in_subquery(contests_by_problem_count(|count| count.gte(min))),
        );
    }
    if let Some(max) = query.max_problems {
        cond = cond.add(
            contest::Column::Id.not_in_subquery(contests_by_problem_count(|count| count.gt(max))),
        );
    }

    cond
}

pub async fn list_contests<C: ConnectionTrait>(
    db: &C,
    query: &ContestListQuery,
) -> Result<ContestListResponse, AppError> {
    query.validate()?;
    let window = Window::new(query.skip, query.limit);

    let select = contest::Entity::find().filter(contest_filter(query));
    let total = select.clone().paginate(db, window.limit).num_items().await?;

    let models = select
        .order_by_desc(contest::Column::StartTime)
        .order_by_desc(contest::Column::Id)
        .offset(Some(window.skip))
        .limit(Some(window.limit))
        .all(db)
        .await?;

    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let counts = problem_counts(db, &ids).await?;
    let data = models
        .into_iter()
        .map(|m| {
            let count = counts.get(&m.id).copied().unwrap_or(0);
            ContestListItem::new(m, count)
        })
        .collect();

    Ok(ContestListResponse {
        data,
        pagination: window.pagination(total),
    })
}

async fn problem_counts<C: ConnectionTrait>(
    db: &C,
    contest_ids: &[i32],
) -> Result<HashMap<i32, i64>, DbErr> {
    if contest_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i32, i64)> = problem_contest::Entity::find()
        .select_only()
        .column(problem_contest::Column::ContestId)
        .column_as(
            Expr::expr(Func::count(Expr::col(problem_contest::Column::ProblemId))),
            "problem_count",
        )
        .filter(problem_contest::Column::ContestId.is_in(contest_ids.iter().copied()))
        .group_by(problem_contest::Column::ContestId)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows.into_iter().collect())
}

/// Look up a contest by ID, returning 404 if not found.
pub async fn find_contest<C: ConnectionTrait>(db: &C, id: i32) -> Result<contest::Model, AppError> {
    contest::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest not found".into()))
}

/// Problem ids linked to `contest_id`.
pub(crate) fn contest_problem_ids(contest_id: i32) -> SelectStatement {
    SeaQuery::select()
        .column(problem_contest::Column::ProblemId)
        .from(problem_contest::Entity)
        .and_where(Expr::col(problem_contest::Column::ContestId).eq(contest_id))
        .to_owned()
}

pub async fn get_contest<C: ConnectionTrait>(db: &C, id: i32) -> Result<ContestResponse, AppError> {
    let model = find_contest(db, id).await?;

    let problems = problem::Entity::find()
        .filter(problem::Column::Id.in_subquery(contest_problem_ids(id)))
        .order_by_asc(problem::Column::Index)
        .order_by_asc(problem::Column::Id)
        .all(db)
        .await?;

    Ok(ContestResponse::new(model, problems))
}
