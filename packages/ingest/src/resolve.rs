//! Fallback chains for values the platform spreads across several endpoints.
//!
//! A [`FallbackChain`] holds resolvers in priority order. Each resolver knows
//! one endpoint and how to read the value out of its shape; the chain only
//! decides which answer wins.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::observer::IngestObserver;
use crate::source::payload::{Problemset, Standings, Submission};
use crate::source::{ContestSource, SourceError, fetch};

/// Composite identity of a problem on the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemKey {
    pub contest_id: i32,
    pub index: String,
}

impl ProblemKey {
    pub fn new(contest_id: i32, index: impl Into<String>) -> Self {
        Self {
            contest_id,
            index: index.into(),
        }
    }

    /// Stored form of the key, `{contest_id}_{index}`.
    pub fn uid(&self) -> String {
        format!("{}_{}", self.contest_id, self.index)
    }
}

impl fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.contest_id, self.index)
    }
}

/// One way of deriving a `T` for a problem.
///
/// `Ok(None)` means the endpoint answered but had nothing usable.
#[async_trait]
pub trait Resolver<T>: Send + Sync {
    fn name(&self) -> &str;

    async fn resolve(
        &self,
        source: &dyn ContestSource,
        key: &ProblemKey,
    ) -> Result<Option<T>, SourceError>;
}

pub struct FallbackChain<T> {
    resolvers: Vec<Box<dyn Resolver<T>>>,
}

impl<T: Send + 'static> FallbackChain<T> {
    pub fn new() -> Self {
        Self {
            resolvers: Vec::new(),
        }
    }

    /// Append a resolver with lower priority than the ones already added.
    pub fn then(mut self, resolver: impl Resolver<T> + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Value of the first resolver that produces one.
    pub async fn first(
        &self,
        source: &dyn ContestSource,
        key: &ProblemKey,
        observer: &dyn IngestObserver,
    ) -> Option<T> {
        for resolver in &self.resolvers {
            match resolver.resolve(source, key).await {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {
                    debug!(resolver = resolver.name(), problem = %key, "Resolver had no data")
                }
                Err(e) => observer.resolver_failed(resolver.name(), key, &e),
            }
        }
        None
    }

    /// Values of every resolver that produces one, in priority order.
    pub async fn all(
        &self,
        source: &dyn ContestSource,
        key: &ProblemKey,
        observer: &dyn IngestObserver,
    ) -> Vec<T> {
        let mut values = Vec::new();
        for resolver in &self.resolvers {
            match resolver.resolve(source, key).await {
                Ok(Some(value)) => values.push(value),
                Ok(None) => {
                    debug!(resolver = resolver.name(), problem = %key, "Resolver had no data")
                }
                Err(e) => observer.resolver_failed(resolver.name(), key, &e),
            }
        }
        values
    }
}

impl<T: Send + 'static> Default for FallbackChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Query for the problem headers of a contest, optionally localized.
pub(crate) fn standings_params(contest_id: i32, lang: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("contestId", contest_id.to_string()),
        ("showUnofficial", "false".to_string()),
        ("from", "1".to_string()),
        ("count", "1".to_string()),
    ];
    if let Some(lang) = lang {
        params.push(("lang", lang.to_string()));
    }
    params
}

fn to_count(n: i64) -> i32 {
    i32::try_from(n.max(0)).unwrap_or(i32::MAX)
}

/// Problem name in a specific locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub locale: String,
    pub name: String,
}

/// Reads the problem header from the standings rendered in `locale`.
pub struct LocalizedName {
    locale: String,
}

impl LocalizedName {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

#[async_trait]
impl Resolver<Translation> for LocalizedName {
    fn name(&self) -> &str {
        &self.locale
    }

    async fn resolve(
        &self,
        source: &dyn ContestSource,
        key: &ProblemKey,
    ) -> Result<Option<Translation>, SourceError> {
        let params = standings_params(key.contest_id, Some(&self.locale));
        let standings: Standings = fetch(source, "contest.standings", &params).await?;

        Ok(standings
            .problems
            .into_iter()
            .find(|p| p.has_index(&key.index))
            .filter(|p| !p.name.trim().is_empty())
            .map(|p| Translation {
                locale: self.locale.clone(),
                name: p.name,
            }))
    }
}

type SolvedIndex = HashMap<(i32, String), i64>;

/// Solved counts from the global problemset statistics.
///
/// The endpoint returns the whole problemset, so its first answer, success or
/// failure, is kept for the lifetime of the resolver.
#[derive(Default)]
pub struct ProblemsetSolvedCount {
    stats: Mutex<Option<Result<Arc<SolvedIndex>, SourceError>>>,
}

impl ProblemsetSolvedCount {
    pub fn new() -> Self {
        Self::default()
    }

    async fn statistics(
        &self,
        source: &dyn ContestSource,
    ) -> Result<Arc<SolvedIndex>, SourceError> {
        let mut cached = self.stats.lock().await;
        if let Some(stats) = cached.as_ref() {
            return stats.clone();
        }

        let stats = fetch::<Problemset>(source, "problemset.problems", &[])
            .await
            .map(|problemset| {
                let index: SolvedIndex = problemset
                    .problem_statistics
                    .into_iter()
                    .filter_map(|s| Some(((s.contest_id?, s.index?), s.solved_count?)))
                    .collect();
                Arc::new(index)
            });
        *cached = Some(stats.clone());
        stats
    }
}

#[async_trait]
impl Resolver<i32> for ProblemsetSolvedCount {
    fn name(&self) -> &str {
        "problemset.problems"
    }

    async fn resolve(
        &self,
        source: &dyn ContestSource,
        key: &ProblemKey,
    ) -> Result<Option<i32>, SourceError> {
        let stats = self.statistics(source).await?;
        Ok(stats
            .get(&(key.contest_id, key.index.clone()))
            .copied()
            .map(to_count))
    }
}

/// Solved counts attached to the contest standings, on the problem header or
/// on a ranklist problem result.
pub struct StandingsSolvedCount;

#[async_trait]
impl Resolver<i32> for StandingsSolvedCount {
    fn name(&self) -> &str {
        "contest.standings"
    }

    async fn resolve(
        &self,
        source: &dyn ContestSource,
        key: &ProblemKey,
    ) -> Result<Option<i32>, SourceError> {
        let params = standings_params(key.contest_id, None);
        let standings: Standings = fetch(source, "contest.standings", &params).await?;

        let from_header = standings
            .problems
            .iter()
            .find_map(|p| p.solved_count.filter(|_| p.has_index(&key.index)));
        let from_rows = || {
            standings
                .rows
                .iter()
                .flat_map(|row| &row.problem_results)
                .find_map(|r| {
                    r.solved_count
                        .filter(|_| r.index.as_deref() == Some(key.index.as_str()))
                })
        };

        Ok(from_header.or_else(from_rows).map(to_count))
    }
}

/// Counts accepted submissions in the most recent page of the contest status.
pub struct AcceptedSubmissions {
    scan_limit: u32,
}

impl AcceptedSubmissions {
    pub fn new(scan_limit: u32) -> Self {
        Self { scan_limit }
    }
}

#[async_trait]
impl Resolver<i32> for AcceptedSubmissions {
    fn name(&self) -> &str {
        "contest.status"
    }

    async fn resolve(
        &self,
        source: &dyn ContestSource,
        key: &ProblemKey,
    ) -> Result<Option<i32>, SourceError> {
        let params = [
            ("contestId", key.contest_id.to_string()),
            ("from", "1".to_string()),
            ("count", self.scan_limit.to_string()),
        ];
        let submissions: Vec<Submission> = fetch(source, "contest.status", &params).await?;

        let accepted = submissions
            .iter()
            .filter(|s| s.is_accepted_for(&key.index))
            .count();
        Ok((accepted > 0).then(|| to_count(accepted as i64)))
    }
}

/// Locale resolvers in preference order.
pub fn name_chain(locales: &[String]) -> FallbackChain<Translation> {
    locales
        .iter()
        .fold(FallbackChain::new(), |chain, locale| {
            chain.then(LocalizedName::new(locale.clone()))
        })
}

/// Problemset statistics, then standings, then accepted submissions.
pub fn solved_count_chain(scan_limit: u32) -> FallbackChain<i32> {
    FallbackChain::new()
        .then(ProblemsetSolvedCount::new())
        .then(StandingsSolvedCount)
        .then(AcceptedSubmissions::new(scan_limit))
}
