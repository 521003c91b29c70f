//! Canonical web links for contests and problems.
//!
//! The platform serves a contest from one of three archives depending on its
//! numeric id, and problem links follow the same split.

/// Public site used when no other base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://codeforces.com";

/// Archive a contest id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archive {
    /// Ids `1..=10000`.
    Contest,
    /// Ids `10001..100000`. There is no stable per-contest page in this range.
    Problemset,
    /// Everything else, including ids `>= 100000`.
    Gym,
}

impl Archive {
    pub fn of(contest_id: i32) -> Self {
        match contest_id {
            1..=10_000 => Archive::Contest,
            10_001..=99_999 => Archive::Problemset,
            _ => Archive::Gym,
        }
    }
}

pub fn contest_url(base: &str, contest_id: i32) -> String {
    let base = base.trim_end_matches('/');
    match Archive::of(contest_id) {
        Archive::Contest => format!("{base}/contest/{contest_id}"),
        Archive::Problemset => format!("{base}/problemset"),
        Archive::Gym => format!("{base}/gym/{contest_id}"),
    }
}

pub fn problem_url(base: &str, contest_id: i32, index: &str) -> String {
    let base = base.trim_end_matches('/');
    match Archive::of(contest_id) {
        Archive::Contest => format!("{base}/contest/{contest_id}/problem/{index}"),
        Archive::Problemset => format!("{base}/problemset/problem/{contest_id}/{index}"),
        Archive::Gym => format!("{base}/gym/{contest_id}/problem/{index}"),
    }
}
