use std::sync::Arc;

use chrono::Utc;
use common::entity::{contest, problem_contest, problem_language, problem_tag};
use sea_orm::{DatabaseConnection, Set, TransactionTrait};

use crate::config::IngestConfig;
use crate::error::{IngestError, Result};
use crate::observer::{IngestObserver, TracingObserver};
use crate::reconcile::{
    ContestRecord, ProblemRecord, ensure_link, resolve_tag, upsert_contest, upsert_problem,
    upsert_statistics,
};
use crate::resolve::{FallbackChain, ProblemKey, Translation, name_chain, solved_count_chain, standings_params};
use crate::source::payload::{RemoteContest, RemoteProblem, Standings};
use crate::source::{ContestSource, fetch};

/// Counters for one reconciliation pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub contests_processed: usize,
    pub contests_failed: usize,
    pub problems_stored: usize,
    pub problems_failed: usize,
}

/// Resolver chains for one pass; problemset statistics are cached inside.
struct Chains {
    names: FallbackChain<Translation>,
    solved: FallbackChain<i32>,
}

/// Pulls recent finished contests from the source and reconciles them into the store.
pub struct Ingestor {
    source: Arc<dyn ContestSource>,
    db: DatabaseConnection,
    config: IngestConfig,
    observer: Arc<dyn IngestObserver>,
}

impl Ingestor {
    pub fn new(source: Arc<dyn ContestSource>, db: DatabaseConnection, config: IngestConfig) -> Self {
        Self {
            source,
            db,
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn IngestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run one pass. Per-contest and per-problem failures are reported to the
    /// observer and counted; only a missing contest list ends the pass early.
    pub async fn run(&self) -> Result<IngestReport> {
        let contests = self.select_contests().await?;
        let chains = Chains {
            names: name_chain(&self.config.locales),
            solved: solved_count_chain(self.config.submission_scan_limit),
        };

        let mut report = IngestReport::default();
        for remote in &contests {
            self.observer.contest_started(remote);
            match self.ingest_contest(remote, &chains, &mut report).await {
                Ok(()) => report.contests_processed += 1,
                Err(e) => {
                    report.contests_failed += 1;
                    self.observer.contest_failed(remote.id, &e);
                }
            }
        }

        self.observer.run_finished(&report);
        Ok(report)
    }

    /// The most recent finished contests, newest first.
    pub async fn select_contests(&self) -> Result<Vec<RemoteContest>> {
        let all: Vec<RemoteContest> = fetch(self.source.as_ref(), "contest.list", &[]).await?;
        let selected = select_recent_finished(all, self.config.max_contests);
        if selected.is_empty() {
            return Err(IngestError::NoContests);
        }
        Ok(selected)
    }

    async fn ingest_contest(
        &self,
        remote: &RemoteContest,
        chains: &Chains,
        report: &mut IngestReport,
    ) -> Result<()> {
        let record = ContestRecord::from_remote(remote, &self.config.site_url);
        let txn = self.db.begin().await?;
        let contest = upsert_contest(&txn, &record, Utc::now()).await?;
        txn.commit().await?;

        let params = standings_params(contest.external_id, None);
        let standings: Standings =
            fetch(self.source.as_ref(), "contest.standings", &params).await?;
        if standings.problems.is_empty() {
            self.observer.contest_without_problems(contest.external_id);
            return Ok(());
        }

        for header in &standings.problems {
            match self.ingest_problem(&contest, header, chains).await {
                Ok(()) => report.problems_stored += 1,
                Err(e) => {
                    report.problems_failed += 1;
                    self.observer
                        .problem_failed(contest.external_id, header.index.as_deref(), &e);
                }
            }
        }

        Ok(())
    }

    async fn ingest_problem(
        &self,
        contest: &contest::Model,
        header: &RemoteProblem,
        chains: &Chains,
    ) -> Result<()> {
        let index = header
            .index
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .ok_or_else(|| {
                IngestError::Reconcile(format!(
                    "problem header without index in contest {}",
                    contest.external_id
                ))
            })?;
        let key = ProblemKey::new(contest.external_id, index);
        let source = self.source.as_ref();
        let observer = self.observer.as_ref();

        let translations = chains.names.all(source, &key, observer).await;
        let solved_count = chains.solved.first(source, &key, observer).await.unwrap_or(0);

        let localized = translations.first().map(|t| t.name.clone());
        let record = ProblemRecord::from_remote(&key, header, localized, &self.config.site_url)?;
        let mut locales: Vec<&str> = translations.iter().map(|t| t.locale.as_str()).collect();
        if locales.is_empty() {
            locales.push(&self.config.default_locale);
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let problem = upsert_problem(&txn, &record, now).await?;
        upsert_statistics(&txn, problem.id, contest.id, solved_count, now).await?;
        ensure_link(
            &txn,
            problem_contest::ActiveModel {
                problem_id: Set(problem.id),
                contest_id: Set(contest.id),
            },
        )
        .await?;

        for name in &record.tags {
            let tag = resolve_tag(&txn, name).await?;
            ensure_link(
                &txn,
                problem_tag::ActiveModel {
                    problem_id: Set(problem.id),
                    tag_id: Set(tag.id),
                },
            )
            .await?;
        }

        for locale in locales {
            ensure_link(
                &txn,
                problem_language::ActiveModel {
                    problem_id: Set(problem.id),
                    language_code: Set(locale.to_string()),
                },
            )
            .await?;
        }

        txn.commit().await?;
        self.observer.problem_stored(&key, solved_count);
        Ok(())
    }
}

/// Keep finished contests, newest start first, at most `limit` of them.
/// Contests without a start time sort last.
pub fn select_recent_finished(contests: Vec<RemoteContest>, limit: usize) -> Vec<RemoteContest> {
    let mut finished: Vec<RemoteContest> =
        contests.into_iter().filter(RemoteContest::is_finished).collect();
    finished.sort_by(|a, b| b.start_time_seconds.cmp(&a.start_time_seconds));
    finished.truncate(limit);
    finished
}
