//! Read-side queries shared by the HTTP handlers.
//!
//! Each list operation builds one filtered `Select`, counts it for the
//! pagination total, then loads the requested window plus the tag names of
//! the rows on it.

pub mod contest;
pub mod problem;
pub mod tag;

use std::collections::HashMap;

use common::entity::{problem as problem_entity, problem_tag, tag as tag_entity};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, Func, LikeExpr, Query as SeaQuery, SelectStatement};
use sea_orm::*;

use crate::models::shared::escape_like;

/// Case-insensitive substring match on `column`, or `None` for a blank term.
pub(crate) fn name_contains<C: ColumnTrait>(column: C, term: Option<&str>) -> Option<Condition> {
    let term = escape_like(term?.trim());
    if term.is_empty() {
        return None;
    }
    Some(Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
    ))
}

/// Problems whose tag set is exactly `tags`.
///
/// `tags` must already be free of duplicates, otherwise the HAVING count can
/// never be reached.
pub(crate) fn tag_set_equals(tags: &[String]) -> Condition {
    Condition::all()
        .add(problem_entity::Column::Id.in_subquery(problems_with_all_tags(tags)))
        .add(problem_entity::Column::Id.not_in_subquery(problems_with_other_tags(tags)))
}

/// Problem ids carrying every tag in `tags`, possibly among others.
fn problems_with_all_tags(tags: &[String]) -> SelectStatement {
    tagged_problems()
        .and_where(Expr::col((tag_entity::Entity, tag_entity::Column::Name)).is_in(tags.iter().cloned()))
        .group_by_col((problem_tag::Entity, problem_tag::Column::ProblemId))
        .and_having(
            Expr::expr(Func::count_distinct(Expr::col((
                tag_entity::Entity,
                tag_entity::Column::Id,
            ))))
            .eq(tags.len() as i64),
        )
        .to_owned()
}

/// Problem ids carrying at least one tag outside `tags`.
fn problems_with_other_tags(tags: &[String]) -> SelectStatement {
    tagged_problems()
        .and_where(
            Expr::col((tag_entity::Entity, tag_entity::Column::Name)).is_not_in(tags.iter().cloned()),
        )
        .to_owned()
}

fn tagged_problems() -> SelectStatement {
    SeaQuery::select()
        .column((problem_tag::Entity, problem_tag::Column::ProblemId))
        .from(problem_tag::Entity)
        .inner_join(
            tag_entity::Entity,
            Expr::col((tag_entity::Entity, tag_entity::Column::Id))
                .equals((problem_tag::Entity, problem_tag::Column::TagId)),
        )
        .to_owned()
}

/// Sorted tag names for each of `problem_ids`.
pub(crate) async fn tag_names<C: ConnectionTrait>(
    db: &C,
    problem_ids: &[i32],
) -> Result<HashMap<i32, Vec<String>>, DbErr> {
    if problem_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = problem_tag::Entity::find()
        .filter(problem_tag::Column::ProblemId.is_in(problem_ids.iter().copied()))
        .find_also_related(tag_entity::Entity)
        .all(db)
        .await?;

    let mut names: HashMap<i32, Vec<String>> = HashMap::new();
    for (link, tag) in rows {
        if let Some(tag) = tag {
            names.entry(link.problem_id).or_default().push(tag.name);
        }
    }
    for list in names.values_mut() {
        list.sort();
    }
    Ok(names)
}
