use std::collections::HashMap;

use common::entity::{contest, problem, problem_contest, problem_language, problem_statistics};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, Query as SeaQuery, SelectStatement};
use sea_orm::*;

use super::contest::{contest_problem_ids, find_contest};
use super::{name_contains, tag_names, tag_set_equals};
use crate::error::AppError;
use crate::models::problem::{
    ContestProblemListQuery, ProblemListItem, ProblemListQuery, ProblemListResponse,
    ProblemResponse,
};
use crate::models::shared::{Window, parse_tags};

/// Rating bounds as a condition, `None` when neither bound is given.
fn rating_range(min: Option<i32>, max: Option<i32>) -> Option<Condition> {
    if min.is_none() && max.is_none() {
        return None;
    }
    let mut range = Condition::all();
    if let Some(min) = min {
        range = range.add(problem::Column::Rating.gte(min));
    }
    if let Some(max) = max {
        range = range.add(problem::Column::Rating.lte(max));
    }
    Some(range)
}

/// Problem ids with a statistics row at or above `min`, optionally within one contest.
fn solved_at_least(min: i32, contest_id: Option<i32>) -> SelectStatement {
    let mut select = SeaQuery::select();
    select
        .column(problem_statistics::Column::ProblemId)
        .from(problem_statistics::Entity)
        .and_where(Expr::col(problem_statistics::Column::SolvedCount).gte(min));
    if let Some(contest_id) = contest_id {
        select.and_where(Expr::col(problem_statistics::Column::ContestId).eq(contest_id));
    }
    select.to_owned()
}

fn common_filters(
    mut cond: Condition,
    name: Option<&str>,
    tags: Option<&str>,
) -> Condition {
    if let Some(name) = name_contains(problem::Column::Name, name) {
        cond = cond.add(name);
    }
    let tags = parse_tags(tags);
    if !tags.is_empty() {
        cond = cond.add(tag_set_equals(&tags));
    }
    cond
}

pub fn problem_filter(query: &ProblemListQuery) -> Condition {
    let mut cond = common_filters(
        Condition::all(),
        query.name.as_deref(),
        query.tags.as_deref(),
    );

    match (rating_range(query.min_rating, query.max_rating), query.include_null_rating) {
        (Some(range), false) => cond = cond.add(range),
        (Some(range), true) => {
            cond = cond.add(
                Condition::any()
                    .add(range)
                    .add(problem::Column::Rating.is_null()),
            )
        }
        (None, false) => cond = cond.add(problem::Column::Rating.is_not_null()),
        (None, true) => {}
    }

    if let Some(contest_id) = query.contest_id {
        cond = cond.add(problem::Column::Id.in_subquery(contest_problem_ids(contest_id)));
    }
    if let Some(min) = query.min_solved_count.filter(|&min| min > 0) {
        cond = cond.add(problem::Column::Id.in_subquery(solved_at_least(min, None)));
    }

    cond
}

pub fn contest_problem_filter(contest_id: i32, query: &ContestProblemListQuery) -> Condition {
    let mut cond = common_filters(
        Condition::all().add(problem::Column::Id.in_subquery(contest_problem_ids(contest_id))),
        query.name.as_deref(),
        query.tags.as_deref(),
    );

    if let Some(range) = rating_range(query.min_rating, query.max_rating) {
        cond = cond.add(range);
    }
    if let Some(min) = query.min_solved_count.filter(|&min| min > 0) {
        cond = cond.add(problem::Column::Id.in_subquery(solved_at_least(min, Some(contest_id))));
    }

    cond
}

async fn with_tags<C: ConnectionTrait>(
    db: &C,
    models: Vec<problem::Model>,
) -> Result<Vec<ProblemListItem>, DbErr> {
    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let mut tags = tag_names(db, &ids).await?;
    Ok(models
        .into_iter()
        .map(|m| {
            let names = tags.remove(&m.id).unwrap_or_default();
            ProblemListItem::new(m, names)
        })
        .collect())
}

pub async fn list_problems<C: ConnectionTrait>(
    db: &C,
    query: &ProblemListQuery,
) -> Result<ProblemListResponse, AppError> {
    query.validate()?;
    let window = Window::new(query.skip, query.limit);

    let select = problem::Entity::find().filter(problem_filter(query));
    let total = select.clone().paginate(db, window.limit).num_items().await?;

    let models = select
        .order_by_desc(problem::Column::Rating)
        .order_by_asc(problem::Column::Id)
        .offset(Some(window.skip))
        .limit(Some(window.limit))
        .all(db)
        .await?;

    Ok(ProblemListResponse {
        data: with_tags(db, models).await?,
        pagination: window.pagination(total),
    })
}

/// Problems of one contest. Only an unknown contest is a 404; no matches is an
/// empty page, same as the global listing.
pub async fn list_contest_problems<C: ConnectionTrait>(
    db: &C,
    contest_id: i32,
    query: &ContestProblemListQuery,
) -> Result<ProblemListResponse, AppError> {
    query.validate()?;
    let window = Window::new(query.skip, query.limit);
    find_contest(db, contest_id).await?;

    let select = problem::Entity::find().filter(contest_problem_filter(contest_id, query));
    let total = select.clone().paginate(db, window.limit).num_items().await?;

    let models = select
        .order_by_asc(problem::Column::Rating)
        .order_by_asc(problem::Column::Id)
        .offset(Some(window.skip))
        .limit(Some(window.limit))
        .all(db)
        .await?;

    let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
    let solved: HashMap<i32, i32> = problem_statistics::Entity::find()
        .filter(problem_statistics::Column::ContestId.eq(contest_id))
        .filter(problem_statistics::Column::ProblemId.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.problem_id, s.solved_count))
        .collect();

    let mut data = with_tags(db, models).await?;
    for item in &mut data {
        item.solved_count = solved.get(&item.id).copied();
    }

    Ok(ProblemListResponse {
        data,
        pagination: window.pagination(total),
    })
}

pub async fn get_problem<C: ConnectionTrait>(db: &C, id: i32) -> Result<ProblemResponse, AppError> {
    let model = problem::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem not found".into()))?;

    let contests = contest::Entity::find()
        .filter(
            contest::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(problem_contest::Column::ContestId)
                    .from(problem_contest::Entity)
                    .and_where(Expr::col(problem_contest::Column::ProblemId).eq(id))
                    .to_owned(),
            ),
        )
        .order_by_desc(contest::Column::StartTime)
        .order_by_desc(contest::Column::Id)
        .all(db)
        .await?;

    let tags = tag_names(db, &[id]).await?.remove(&id).unwrap_or_default();

    let statistics = problem_statistics::Entity::find()
        .filter(problem_statistics::Column::ProblemId.eq(id))
        .order_by_asc(problem_statistics::Column::ContestId)
        .all(db)
        .await?;

    let languages = problem_language::Entity::find()
        .filter(problem_language::Column::ProblemId.eq(id))
        .order_by_asc(problem_language::Column::LanguageCode)
        .all(db)
        .await?
        .into_iter()
        .map(|l| l.language_code)
        .collect();

    Ok(ProblemResponse {
        id: model.id,
        problem_uid: model.problem_uid,
        index: model.index,
        name: model.name,
        rating: model.rating,
        time_limit: model.time_limit,
        memory_limit: model.memory_limit,
        url: model.url,
        created_at: model.created_at,
        updated_at: model.updated_at,
        contests: contests.into_iter().map(Into::into).collect(),
        tags,
        statistics: statistics.into_iter().map(Into::into).collect(),
        languages,
    })
}
