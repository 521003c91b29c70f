use tracing::{error, info, warn};

use crate::engine::IngestReport;
use crate::error::IngestError;
use crate::resolve::ProblemKey;
use crate::source::SourceError;
use crate::source::payload::RemoteContest;

/// Receives progress events from an [`Ingestor`](crate::Ingestor) run.
///
/// All methods default to doing nothing so observers only implement the
/// events they care about.
pub trait IngestObserver: Send + Sync {
    fn contest_started(&self, _contest: &RemoteContest) {}

    fn contest_without_problems(&self, _external_id: i32) {}

    fn contest_failed(&self, _external_id: i32, _error: &IngestError) {}

    fn problem_stored(&self, _key: &ProblemKey, _solved_count: i32) {}

    fn problem_failed(&self, _external_id: i32, _index: Option<&str>, _error: &IngestError) {}

    fn resolver_failed(&self, _resolver: &str, _key: &ProblemKey, _error: &SourceError) {}

    fn run_finished(&self, _report: &IngestReport) {}
}

/// Default observer, forwards every event to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl IngestObserver for TracingObserver {
    fn contest_started(&self, contest: &RemoteContest) {
        info!(contest_id = contest.id, name = %contest.name, "Processing contest");
    }

    fn contest_without_problems(&self, external_id: i32) {
        warn!(contest_id = external_id, "No problems found for contest");
    }

    fn contest_failed(&self, external_id: i32, error: &IngestError) {
        error!(contest_id = external_id, error = %error, "Error processing contest");
    }

    fn problem_stored(&self, key: &ProblemKey, solved_count: i32) {
        info!(problem = %key, solved_count, "Processed problem");
    }

    fn problem_failed(&self, external_id: i32, index: Option<&str>, error: &IngestError) {
        error!(
            contest_id = external_id,
            index = index.unwrap_or("?"),
            error = %error,
            "Error processing problem"
        );
    }

    fn resolver_failed(&self, resolver: &str, key: &ProblemKey, error: &SourceError) {
        warn!(resolver, problem = %key, error = %error, "Resolver failed, trying next");
    }

    fn run_finished(&self, report: &IngestReport) {
        info!(
            contests = report.contests_processed,
            contests_failed = report.contests_failed,
            problems = report.problems_stored,
            problems_failed = report.problems_failed,
            "Ingestion pass completed"
        );
    }
}
