use chrono::{DateTime, Utc};
use common::entity::{contest, problem};
use serde::{Deserialize, Serialize};

use super::shared::{Pagination, validate_non_negative};
use crate::error::AppError;

/// Query parameters for listing contests. All filters are AND-combined.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ContestListQuery {
    /// Case-insensitive substring of the contest name.
    #[param(example = "Round")]
    pub name: Option<String>,
    /// Exact contest type.
    #[param(example = "CF")]
    pub contest_type: Option<String>,
    /// Exact phase.
    #[param(example = "FINISHED")]
    pub phase: Option<String>,
    /// Minimum duration in minutes (inclusive).
    pub min_duration: Option<i32>,
    /// Maximum duration in minutes (inclusive).
    pub max_duration: Option<i32>,
    /// Earliest start time (inclusive).
    pub start_time_from: Option<DateTime<Utc>>,
    /// Latest start time (inclusive).
    pub start_time_to: Option<DateTime<Utc>>,
    /// Minimum number of linked problems (inclusive). Contests without
    /// problems count as 0.
    pub min_problems: Option<i64>,
    /// Maximum number of linked problems (inclusive).
    pub max_problems: Option<i64>,
    /// Rows to skip. Default 0.
    #[param(example = 0)]
    pub skip: Option<u64>,
    /// Page size (1-500, default 100).
    #[param(example = 100)]
    pub limit: Option<u64>,
}

impl ContestListQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_non_negative("min_duration", self.min_duration)?;
        validate_non_negative("max_duration", self.max_duration)?;
        validate_non_negative("min_problems", self.min_problems)?;
        validate_non_negative("max_problems", self.max_problems)?;
        Ok(())
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContestListItem {
    #[schema(example = 1)]
    pub id: i32,
    /// Contest id on the upstream platform.
    #[schema(example = 500)]
    pub external_id: i32,
    #[schema(example = "Codeforces Round 500")]
    pub name: String,
    #[serde(rename = "type")]
    #[schema(example = "CF")]
    pub contest_type: String,
    #[schema(example = "FINISHED")]
    pub phase: String,
    pub start_time: Option<DateTime<Utc>>,
    /// Duration in minutes.
    #[schema(example = 120)]
    pub duration: Option<i32>,
    #[schema(example = "https://codeforces.com/contest/500")]
    pub url: String,
    /// Number of problems linked to the contest.
    #[schema(example = 6)]
    pub problem_count: i64,
}

impl ContestListItem {
    pub fn new(m: contest::Model, problem_count: i64) -> Self {
        Self {
            id: m.id,
            external_id: m.external_id,
            name: m.name,
            contest_type: m.kind,
            phase: m.phase,
            start_time: m.start_time,
            duration: m.duration,
            url: m.url,
            problem_count,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContestListResponse {
    pub data: Vec<ContestListItem>,
    pub pagination: Pagination,
}

/// Problem summary shown inside a contest.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContestProblemRef {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "500_A")]
    pub problem_uid: String,
    #[schema(example = "A")]
    pub index: String,
    pub name: String,
    pub rating: Option<i32>,
    pub url: String,
}

impl From<problem::Model> for ContestProblemRef {
    fn from(m: problem::Model) -> Self {
        Self {
            id: m.id,
            problem_uid: m.problem_uid,
            index: m.index,
            name: m.name,
            rating: m.rating,
            url: m.url,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ContestResponse {
    pub id: i32,
    pub external_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub contest_type: String,
    pub phase: String,
    pub start_time: Option<DateTime<Utc>>,
    /// Duration in minutes.
    pub duration: Option<i32>,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Problems of the contest ordered by index.
    pub problems: Vec<ContestProblemRef>,
}

impl ContestResponse {
    pub fn new(m: contest::Model, problems: Vec<problem::Model>) -> Self {
        Self {
            id: m.id,
            external_id: m.external_id,
            name: m.name,
            contest_type: m.kind,
            phase: m.phase,
            start_time: m.start_time,
            duration: m.duration,
            url: m.url,
            created_at: m.created_at,
            updated_at: m.updated_at,
            problems: problems.into_iter().map(Into::into).collect(),
        }
    }
}
