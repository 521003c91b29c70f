//! Canonical records and idempotent writes against the store.
//!
//! Everything here takes a generic connection so the engine can run it
//! inside the per-item transaction.

use chrono::{DateTime, Utc};
use common::entity::{contest, problem, problem_statistics, tag};
use common::{contest_url, problem_url};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::error::IngestError;
use crate::resolve::ProblemKey;
use crate::source::payload::{RemoteContest, RemoteProblem};

/// Contest fields as they will be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestRecord {
    pub external_id: i32,
    pub name: String,
    pub kind: String,
    pub phase: String,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: Option<i32>,
    pub url: String,
}

impl ContestRecord {
    pub fn from_remote(remote: &RemoteContest, site_url: &str) -> Self {
        Self {
            external_id: remote.id,
            name: remote.name.clone(),
            kind: remote.kind.clone(),
            phase: remote.phase.clone(),
            start_time: remote
                .start_time_seconds
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            duration: remote
                .duration_seconds
                .and_then(|secs| i32::try_from(secs / 60).ok()),
            url: contest_url(site_url, remote.id),
        }
    }
}

/// Problem fields as they will be stored, plus the tags to link.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRecord {
    pub problem_uid: String,
    pub index: String,
    pub name: String,
    pub rating: Option<i32>,
    pub time_limit: Option<i32>,
    pub memory_limit: Option<i32>,
    pub url: String,
    pub tags: Vec<String>,
}

impl ProblemRecord {
    /// Merge the contest header with an optional localized name.
    pub fn from_remote(
        key: &ProblemKey,
        header: &RemoteProblem,
        localized_name: Option<String>,
        site_url: &str,
    ) -> Result<Self, IngestError> {
        let name = localized_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| header.name.clone());
        if name.trim().is_empty() {
            return Err(IngestError::Reconcile(format!("problem {key} has no name")));
        }

        let mut tags: Vec<String> = header
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();

        Ok(Self {
            problem_uid: key.uid(),
            index: key.index.clone(),
            name,
            rating: header.rating,
            time_limit: header
                .time_limit_seconds
                .map(|secs| (secs * 1000.0).round() as i32),
            memory_limit: header
                .memory_limit_bytes
                .and_then(|bytes| i32::try_from(bytes / 1024 / 1024).ok()),
            url: problem_url(site_url, key.contest_id, &key.index),
            tags,
        })
    }
}

/// Insert the contest or overwrite every mutable field of the existing row.
pub async fn upsert_contest<C: ConnectionTrait>(
    db: &C,
    record: &ContestRecord,
    now: DateTime<Utc>,
) -> Result<contest::Model, DbErr> {
    let existing = contest::Entity::find()
        .filter(contest::Column::ExternalId.eq(record.external_id))
        .one(db)
        .await?;

    match existing {
        Some(model) => {
            let mut active: contest::ActiveModel = model.into();
            fill_contest(&mut active, record, now);
            active.update(db).await
        }
        None => {
            let mut active = contest::ActiveModel {
                external_id: Set(record.external_id),
                created_at: Set(now),
                ..Default::default()
            };
            fill_contest(&mut active, record, now);
            active.insert(db).await
        }
    }
}

fn fill_contest(active: &mut contest::ActiveModel, record: &ContestRecord, now: DateTime<Utc>) {
    active.name = Set(record.name.clone());
    active.kind = Set(record.kind.clone());
    active.phase = Set(record.phase.clone());
    active.start_time = Set(record.start_time);
    active.duration = Set(record.duration);
    active.url = Set(record.url.clone());
    active.updated_at = Set(now);
}

/// Insert the problem or overwrite its display fields, keyed by `problem_uid`.
///
/// The rating is written as given, so an unrated problem stays NULL.
pub async fn upsert_problem<C: ConnectionTrait>(
    db: &C,
    record: &ProblemRecord,
    now: DateTime<Utc>,
) -> Result<problem::Model, DbErr> {
    let existing = problem::Entity::find()
        .filter(problem::Column::ProblemUid.eq(record.problem_uid.as_str()))
        .one(db)
        .await?;

    match existing {
        Some(model) => {
            let mut active: problem::ActiveModel = model.into();
            fill_problem(&mut active, record, now);
            active.update(db).await
        }
        None => {
            let mut active = problem::ActiveModel {
                problem_uid: Set(record.problem_uid.clone()),
                index: Set(record.index.clone()),
                created_at: Set(now),
                ..Default::default()
            };
            fill_problem(&mut active, record, now);
            active.insert(db).await
        }
    }
}

fn fill_problem(active: &mut problem::ActiveModel, record: &ProblemRecord, now: DateTime<Utc>) {
    active.name = Set(record.name.clone());
    active.rating = Set(record.rating);
    active.time_limit = Set(record.time_limit);
    active.memory_limit = Set(record.memory_limit);
    active.url = Set(record.url.clone());
    active.updated_at = Set(now);
}

/// Write the solved count for a (problem, contest) pair, replacing any prior value.
pub async fn upsert_statistics<C: ConnectionTrait>(
    db: &C,
    problem_id: i32,
    contest_id: i32,
    solved_count: i32,
    now: DateTime<Utc>,
) -> Result<(), DbErr> {
    let model = problem_statistics::ActiveModel {
        problem_id: Set(problem_id),
        contest_id: Set(contest_id),
        solved_count: Set(solved_count),
        last_updated: Set(now),
    };

    problem_statistics::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([
                problem_statistics::Column::ProblemId,
                problem_statistics::Column::ContestId,
            ])
            .update_columns([
                problem_statistics::Column::SolvedCount,
                problem_statistics::Column::LastUpdated,
            ])
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}

/// Find the tag named `name`, creating it on first use.
pub async fn resolve_tag<C: ConnectionTrait>(db: &C, name: &str) -> Result<tag::Model, DbErr> {
    if let Some(existing) = tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    let model = tag::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    model.insert(db).await
}

/// Insert a row into a pair table unless it is already there.
///
/// Returns whether a new row was written.
pub async fn ensure_link<A, C>(db: &C, model: A) -> Result<bool, DbErr>
where
    A: ActiveModelTrait,
    C: ConnectionTrait,
{
    let key_columns = <A::Entity as EntityTrait>::PrimaryKey::iter().map(|key| key.into_column());
    let result = A::Entity::insert(model)
        .on_conflict(OnConflict::columns(key_columns).do_nothing().to_owned())
        .exec_without_returning(db)
        .await;

    match result {
        Ok(rows) => Ok(rows > 0),
        Err(DbErr::RecordNotInserted) => Ok(false),
        Err(e) => Err(e),
    }
}
