use chrono::{DateTime, Utc};
use common::entity::{contest, problem, problem_statistics};
use serde::{Deserialize, Serialize};

use super::shared::{Pagination, validate_non_negative};
use crate::error::AppError;

/// Query parameters for listing problems.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ProblemListQuery {
    /// Case-insensitive substring of the problem name.
    pub name: Option<String>,
    /// Minimum rating (inclusive).
    #[param(example = 800)]
    pub min_rating: Option<i32>,
    /// Maximum rating (inclusive).
    #[param(example = 1600)]
    pub max_rating: Option<i32>,
    /// Include unrated problems. With a rating range they are added to the
    /// range matches; without one, `false` hides them.
    #[serde(default)]
    pub include_null_rating: bool,
    /// Comma-separated tag names; a problem must carry all of them.
    #[param(example = "math,greedy")]
    pub tags: Option<String>,
    /// Internal contest id the problem must belong to.
    pub contest_id: Option<i32>,
    /// Minimum solved count on any statistics row (inclusive).
    pub min_solved_count: Option<i32>,
    /// Rows to skip. Default 0.
    pub skip: Option<u64>,
    /// Page size (1-500, default 100).
    pub limit: Option<u64>,
}

impl ProblemListQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_non_negative("min_rating", self.min_rating)?;
        validate_non_negative("max_rating", self.max_rating)?;
        validate_non_negative("min_solved_count", self.min_solved_count)?;
        Ok(())
    }
}

/// Query parameters for listing the problems of one contest.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ContestProblemListQuery {
    /// Case-insensitive substring of the problem name.
    pub name: Option<String>,
    /// Minimum rating (inclusive). Unrated problems never match a bound.
    pub min_rating: Option<i32>,
    /// Maximum rating (inclusive).
    pub max_rating: Option<i32>,
    /// Comma-separated tag names; a problem must carry all of them.
    pub tags: Option<String>,
    /// Minimum solved count within this contest (inclusive).
    pub min_solved_count: Option<i32>,
    /// Rows to skip. Default 0.
    pub skip: Option<u64>,
    /// Page size (1-500, default 100).
    pub limit: Option<u64>,
}

impl ContestProblemListQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_non_negative("min_rating", self.min_rating)?;
        validate_non_negative("max_rating", self.max_rating)?;
        validate_non_negative("min_solved_count", self.min_solved_count)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemListItem {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "500_A")]
    pub problem_uid: String,
    #[schema(example = "A")]
    pub index: String,
    #[schema(example = "Apples")]
    pub name: String,
    #[schema(example = 1200)]
    pub rating: Option<i32>,
    /// Time limit in milliseconds.
    #[schema(example = 2000)]
    pub time_limit: Option<i32>,
    /// Memory limit in megabytes.
    #[schema(example = 256)]
    pub memory_limit: Option<i32>,
    #[schema(example = "https://codeforces.com/contest/500/problem/A")]
    pub url: String,
    #[schema(example = json!(["greedy", "math"]))]
    pub tags: Vec<String>,
    /// Solved count within the requested contest. Only set on contest listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solved_count: Option<i32>,
}

impl ProblemListItem {
    pub fn new(m: problem::Model, tags: Vec<String>) -> Self {
        Self {
            id: m.id,
            problem_uid: m.problem_uid,
            index: m.index,
            name: m.name,
            rating: m.rating,
            time_limit: m.time_limit,
            memory_limit: m.memory_limit,
            url: m.url,
            tags,
            solved_count: None,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemListResponse {
    pub data: Vec<ProblemListItem>,
    pub pagination: Pagination,
}

/// Contest a problem appears in.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemContestRef {
    pub id: i32,
    pub external_id: i32,
    pub name: String,
    pub url: String,
}

impl From<contest::Model> for ProblemContestRef {
    fn from(m: contest::Model) -> Self {
        Self {
            id: m.id,
            external_id: m.external_id,
            name: m.name,
            url: m.url,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemStatisticsResponse {
    /// Internal contest id.
    pub contest_id: i32,
    pub solved_count: i32,
    pub last_updated: DateTime<Utc>,
}

impl From<problem_statistics::Model> for ProblemStatisticsResponse {
    fn from(m: problem_statistics::Model) -> Self {
        Self {
            contest_id: m.contest_id,
            solved_count: m.solved_count,
            last_updated: m.last_updated,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProblemResponse {
    pub id: i32,
    pub problem_uid: String,
    pub index: String,
    pub name: String,
    pub rating: Option<i32>,
    /// Time limit in milliseconds.
    pub time_limit: Option<i32>,
    /// Memory limit in megabytes.
    pub memory_limit: Option<i32>,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub contests: Vec<ProblemContestRef>,
    pub tags: Vec<String>,
    pub statistics: Vec<ProblemStatisticsResponse>,
    /// Language codes the problem name was fetched in.
    #[schema(example = json!(["en", "ru"]))]
    pub languages: Vec<String>,
}
