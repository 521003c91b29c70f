//! Typed views of the upstream result bodies.
//!
//! Fields the platform omits on some endpoints are optional here; deciding
//! whether a missing field is fatal is left to the reconciler.

use serde::Deserialize;

/// Lifecycle phase of a contest whose standings are final.
pub const FINISHED_PHASE: &str = "FINISHED";

/// Verdict of an accepted submission.
pub const ACCEPTED_VERDICT: &str = "OK";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContest {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub start_time_seconds: Option<i64>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

impl RemoteContest {
    pub fn is_finished(&self) -> bool {
        self.phase == FINISHED_PHASE
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteProblem {
    #[serde(default)]
    pub contest_id: Option<i32>,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub time_limit_seconds: Option<f64>,
    #[serde(default)]
    pub memory_limit_bytes: Option<i64>,
    #[serde(default)]
    pub solved_count: Option<i64>,
}

impl RemoteProblem {
    pub fn has_index(&self, index: &str) -> bool {
        self.index.as_deref() == Some(index)
    }
}

/// `contest.standings`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    #[serde(default)]
    pub problems: Vec<RemoteProblem>,
    #[serde(default)]
    pub rows: Vec<RanklistRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RanklistRow {
    #[serde(default)]
    pub problem_results: Vec<ProblemResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResult {
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub solved_count: Option<i64>,
}

/// `problemset.problems`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problemset {
    #[serde(default)]
    pub problems: Vec<RemoteProblem>,
    #[serde(default)]
    pub problem_statistics: Vec<ProblemStatistic>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStatistic {
    #[serde(default)]
    pub contest_id: Option<i32>,
    #[serde(default)]
    pub index: Option<String>,
    #[serde(default)]
    pub solved_count: Option<i64>,
}

/// One entry of `contest.status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub problem: Option<RemoteProblem>,
}

impl Submission {
    pub fn is_accepted_for(&self, index: &str) -> bool {
        self.verdict.as_deref() == Some(ACCEPTED_VERDICT)
            && self.problem.as_ref().is_some_and(|p| p.has_index(index))
    }
}
