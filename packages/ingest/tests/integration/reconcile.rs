use std::sync::Arc;

use common::entity::{
    contest, language, problem, problem_contest, problem_language, problem_statistics,
    problem_tag, tag,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::json;

use crate::common::*;

/// Contest 500 (regular archive) with two problems and gym contest 2000000
/// with one unrated problem. Contest 600 has not finished yet.
fn two_contest_source() -> Arc<FixtureSource> {
    let source = Arc::new(FixtureSource::new());
    source.respond(
        "contest.list",
        json!([
            {"id": 600, "name": "Upcoming", "type": "CF", "phase": "BEFORE", "startTimeSeconds": 9000},
            finished_contest(2000000, "Gym Training", 1000),
            finished_contest(500, "Round 500", 2000),
        ]),
    );
    source.respond(
        "contest.standings/500",
        standings(json!([
            {
                "contestId": 500, "index": "A", "name": "Apples", "rating": 1200,
                "tags": ["math", "greedy", "math"],
                "timeLimitSeconds": 2, "memoryLimitBytes": 268435456
            },
            {"contestId": 500, "index": "B", "name": "Bananas", "tags": ["math"]}
        ])),
    );
    source.respond(
        "contest.standings/500?lang=ru",
        standings(json!([
            {"index": "A", "name": "Яблоки"},
            {"index": "B", "name": "Бананы"}
        ])),
    );
    source.respond(
        "contest.standings/500?lang=en",
        standings(json!([
            {"index": "A", "name": "Apples"},
            {"index": "B", "name": "Bananas"}
        ])),
    );
    source.respond(
        "contest.standings/2000000",
        standings(json!([
            {"contestId": 2000000, "index": "A", "name": "Gym task", "tags": ["implementation"]}
        ])),
    );
    source.respond(
        "problemset.problems",
        json!({"problems": [], "problemStatistics": [
            {"contestId": 500, "index": "A", "solvedCount": 3000}
        ]}),
    );
    source.respond(
        "contest.status/500",
        json!([
            {"verdict": "OK", "problem": {"index": "B"}},
            {"verdict": "WRONG_ANSWER", "problem": {"index": "B"}},
            {"verdict": "OK", "problem": {"index": "B"}},
            {"verdict": "OK", "problem": {"index": "A"}}
        ]),
    );
    source
}

async fn find_problem(store: &TestStore, uid: &str) -> problem::Model {
    problem::Entity::find()
        .filter(problem::Column::ProblemUid.eq(uid))
        .one(&store.db)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("problem {uid} not stored"))
}

async fn find_contest(store: &TestStore, external_id: i32) -> contest::Model {
    contest::Entity::find()
        .filter(contest::Column::ExternalId.eq(external_id))
        .one(&store.db)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("contest {external_id} not stored"))
}

async fn solved_count(store: &TestStore, problem_id: i32) -> i32 {
    problem_statistics::Entity::find()
        .filter(problem_statistics::Column::ProblemId.eq(problem_id))
        .one(&store.db)
        .await
        .unwrap()
        .expect("statistics row missing")
        .solved_count
}

async fn language_codes(store: &TestStore, problem_id: i32) -> Vec<String> {
    problem_language::Entity::find()
        .filter(problem_language::Column::ProblemId.eq(problem_id))
        .order_by_asc(problem_language::Column::LanguageCode)
        .all(&store.db)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.language_code)
        .collect()
}

mod scenario {
    use super::*;

    #[tokio::test]
    async fn regular_and_gym_contests_are_stored() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());

        let report = ingestor(&store, &source, &observer).run().await.unwrap();

        assert_eq!(report.contests_processed, 2);
        assert_eq!(report.contests_failed, 0);
        assert_eq!(report.problems_stored, 3);
        assert_eq!(report.problems_failed, 0);
        assert_eq!(store.count(contest::Entity).await, 2);

        let regular = find_contest(&store, 500).await;
        assert_eq!(regular.url, "https://codeforces.com/contest/500");
        assert_eq!(regular.duration, Some(120));
        assert_eq!(regular.kind, "CF");
        let gym = find_contest(&store, 2000000).await;
        assert_eq!(gym.url, "https://codeforces.com/gym/2000000");

        let a = find_problem(&store, "500_A").await;
        assert_eq!(a.name, "Яблоки");
        assert_eq!(a.index, "A");
        assert_eq!(a.rating, Some(1200));
        assert_eq!(a.time_limit, Some(2000));
        assert_eq!(a.memory_limit, Some(256));
        assert_eq!(a.url, "https://codeforces.com/contest/500/problem/A");

        let gym_a = find_problem(&store, "2000000_A").await;
        assert_eq!(gym_a.rating, None);
        assert_eq!(gym_a.name, "Gym task");
        assert_eq!(gym_a.url, "https://codeforces.com/gym/2000000/problem/A");
    }

    #[tokio::test]
    async fn contests_are_visited_newest_first() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());

        ingestor(&store, &source, &observer).run().await.unwrap();

        let started: Vec<String> = observer
            .events()
            .into_iter()
            .filter(|e| e.starts_with("contest_started"))
            .collect();
        assert_eq!(started, vec!["contest_started 500", "contest_started 2000000"]);
    }

    #[tokio::test]
    async fn solved_counts_follow_the_fallback_order() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());

        ingestor(&store, &source, &observer).run().await.unwrap();

        let a = find_problem(&store, "500_A").await;
        let b = find_problem(&store, "500_B").await;
        let gym_a = find_problem(&store, "2000000_A").await;
        assert_eq!(solved_count(&store, a.id).await, 3000);
        assert_eq!(solved_count(&store, b.id).await, 2);
        assert_eq!(solved_count(&store, gym_a.id).await, 0);

        let problemset_calls = source
            .calls()
            .into_iter()
            .filter(|c| c == "problemset.problems")
            .count();
        assert_eq!(problemset_calls, 1);
    }

    #[tokio::test]
    async fn tags_are_shared_across_problems() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());

        ingestor(&store, &source, &observer).run().await.unwrap();

        let names: Vec<String> = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(&store.db)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["greedy", "implementation", "math"]);
        assert_eq!(store.count(problem_tag::Entity).await, 4);
        assert_eq!(store.count(problem_contest::Entity).await, 3);
    }

    #[tokio::test]
    async fn languages_are_linked_per_fetched_translation() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());

        ingestor(&store, &source, &observer).run().await.unwrap();

        let a = find_problem(&store, "500_A").await;
        assert_eq!(language_codes(&store, a.id).await, vec!["en", "ru"]);

        let gym_a = find_problem(&store, "2000000_A").await;
        assert_eq!(language_codes(&store, gym_a.id).await, vec!["en"]);
        assert_eq!(store.count(language::Entity).await, 3);
    }
}

mod idempotence {
    use super::*;

    #[tokio::test]
    async fn second_run_changes_no_row_counts() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());
        let ingestor = ingestor(&store, &source, &observer);

        ingestor.run().await.unwrap();
        let first = (
            store.count(contest::Entity).await,
            store.count(problem::Entity).await,
            store.count(tag::Entity).await,
            store.count(problem_contest::Entity).await,
            store.count(problem_tag::Entity).await,
            store.count(problem_language::Entity).await,
            store.count(problem_statistics::Entity).await,
        );

        ingestor.run().await.unwrap();
        let second = (
            store.count(contest::Entity).await,
            store.count(problem::Entity).await,
            store.count(tag::Entity).await,
            store.count(problem_contest::Entity).await,
            store.count(problem_tag::Entity).await,
            store.count(problem_language::Entity).await,
            store.count(problem_statistics::Entity).await,
        );

        assert_eq!(first, second);
        assert_eq!(first.1, 3);
    }

    #[tokio::test]
    async fn rerun_keeps_surrogate_ids() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());
        let ingestor = ingestor(&store, &source, &observer);

        ingestor.run().await.unwrap();
        let before = find_problem(&store, "500_A").await;
        ingestor.run().await.unwrap();
        let after = find_problem(&store, "500_A").await;

        assert_eq!(before.id, after.id);
        assert_eq!(before.created_at, after.created_at);
    }

    #[tokio::test]
    async fn unrated_problem_stays_null_and_rating_loss_is_written() {
        let store = TestStore::new().await;
        let source = two_contest_source();
        let observer = Arc::new(RecordingObserver::default());
        let ingestor = ingestor(&store, &source, &observer);

        ingestor.run().await.unwrap();
        assert_eq!(find_problem(&store, "500_B").await.rating, None);

        source.respond(
            "contest.standings/500",
            standings(json!([
                {"contestId": 500, "index": "A", "name": "Apples", "tags": ["math"]},
                {"contestId": 500, "index": "B", "name": "Bananas", "rating": 1600, "tags": ["math"]}
            ])),
        );
        ingestor.run().await.unwrap();

        assert_eq!(find_problem(&store, "500_A").await.rating, None);
        assert_eq!(find_problem(&store, "500_B").await.rating, Some(1600));
    }
}
