use crate::common::{TestApp, at, routes};

/// Three contests holding 0, 1 and 3 problems. Returns their ids in that order.
async fn contests_with_problem_counts(app: &TestApp) -> (i32, i32, i32) {
    let empty = app.insert_contest(100, "Empty Round", Some(at(1_000)), Some(120)).await;
    let single = app.insert_contest(200, "Single Round", Some(at(2_000)), Some(90)).await;
    let triple = app.insert_contest(300, "Triple Round", Some(at(3_000)), Some(150)).await;

    app.insert_problem(single, "A", "Only", Some(800), &[]).await;
    for index in ["A", "B", "C"] {
        app.insert_problem(triple, index, "Task", Some(1200), &[]).await;
    }
    (empty, single, triple)
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn newest_contests_come_first() {
        let app = TestApp::spawn().await;
        let (empty, single, triple) = contests_with_problem_counts(&app).await;

        let res = app.get(routes::CONTESTS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![triple as i64, single as i64, empty as i64]);
        assert_eq!(res.total(), 3);
        assert_eq!(res.body["pagination"]["skip"], 0);
        assert_eq!(res.body["pagination"]["limit"], 100);
    }

    #[tokio::test]
    async fn equal_start_times_fall_back_to_id_descending() {
        let app = TestApp::spawn().await;
        let first = app.insert_contest(1, "First", Some(at(500)), None).await;
        let second = app.insert_contest(2, "Second", Some(at(500)), None).await;

        let res = app.get(routes::CONTESTS).await;

        assert_eq!(res.ids(), vec![second as i64, first as i64]);
    }

    #[tokio::test]
    async fn items_carry_type_url_and_problem_count() {
        let app = TestApp::spawn().await;
        let (_, _, triple) = contests_with_problem_counts(&app).await;

        let res = app.get(routes::CONTESTS).await;
        let item = &res.body["data"][0];

        assert_eq!(item["id"], triple);
        assert_eq!(item["type"], "CF");
        assert_eq!(item["external_id"], 300);
        assert_eq!(item["url"], "https://codeforces.com/contest/300");
        assert_eq!(item["problem_count"], 3);
    }

    #[tokio::test]
    async fn skip_and_limit_window_the_results() {
        let app = TestApp::spawn().await;
        let (empty, single, _) = contests_with_problem_counts(&app).await;

        let res = app
            .get_query(routes::CONTESTS, &[("skip", "1"), ("limit", "2")])
            .await;

        assert_eq!(res.ids(), vec![single as i64, empty as i64]);
        assert_eq!(res.total(), 3);
        assert_eq!(res.body["pagination"]["skip"], 1);
        assert_eq!(res.body["pagination"]["limit"], 2);
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let app = TestApp::spawn().await;
        contests_with_problem_counts(&app).await;

        let zero = app.get_query(routes::CONTESTS, &[("limit", "0")]).await;
        assert_eq!(zero.body["pagination"]["limit"], 1);
        assert_eq!(zero.ids().len(), 1);

        let huge = app.get_query(routes::CONTESTS, &[("limit", "100000")]).await;
        assert_eq!(huge.body["pagination"]["limit"], 500);
    }

    #[tokio::test]
    async fn malformed_query_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get_query(routes::CONTESTS, &[("limit", "lots")]).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod filters {
    use super::*;

    #[tokio::test]
    async fn name_match_is_case_insensitive_substring() {
        let app = TestApp::spawn().await;
        let (_, single, _) = contests_with_problem_counts(&app).await;

        let res = app.get_query(routes::CONTESTS, &[("name", "sINGLE")]).await;

        assert_eq!(res.ids(), vec![single as i64]);
    }

    #[tokio::test]
    async fn like_wildcards_in_name_are_literal() {
        let app = TestApp::spawn().await;
        let discounted = app.insert_contest(1, "Sale 100% off", Some(at(10)), None).await;
        app.insert_contest(2, "Sale 1000 off", Some(at(20)), None).await;

        let res = app.get_query(routes::CONTESTS, &[("name", "100%")]).await;

        assert_eq!(res.ids(), vec![discounted as i64]);
    }

    #[tokio::test]
    async fn duration_and_start_bounds_are_inclusive() {
        let app = TestApp::spawn().await;
        let (empty, single, triple) = contests_with_problem_counts(&app).await;

        let res = app
            .get_query(
                routes::CONTESTS,
                &[("min_duration", "90"), ("max_duration", "120")],
            )
            .await;
        assert_eq!(res.ids(), vec![single as i64, empty as i64]);

        let res = app
            .get_query(
                routes::CONTESTS,
                &[
                    ("start_time_from", "1970-01-01T00:33:20Z"),
                    ("start_time_to", "1970-01-01T00:50:00Z"),
                ],
            )
            .await;
        assert_eq!(res.ids(), vec![triple as i64, single as i64]);
    }

    #[tokio::test]
    async fn type_and_phase_match_exactly() {
        let app = TestApp::spawn().await;
        contests_with_problem_counts(&app).await;

        let res = app
            .get_query(routes::CONTESTS, &[("contest_type", "CF"), ("phase", "FINISHED")])
            .await;
        assert_eq!(res.total(), 3);

        let res = app.get_query(routes::CONTESTS, &[("contest_type", "ICPC")]).await;
        assert_eq!(res.total(), 0);
    }

    #[tokio::test]
    async fn problem_count_bounds_treat_empty_contests_as_zero() {
        let app = TestApp::spawn().await;
        let (empty, single, triple) = contests_with_problem_counts(&app).await;
        let (empty, single, triple) = (empty as i64, single as i64, triple as i64);

        let cases: Vec<(Vec<(&str, &str)>, Vec<i64>)> = vec![
            (vec![("min_problems", "0")], vec![triple, single, empty]),
            (vec![("min_problems", "1")], vec![triple, single]),
            (vec![("min_problems", "3")], vec![triple]),
            (vec![("min_problems", "4")], vec![]),
            (vec![("max_problems", "0")], vec![empty]),
            (vec![("max_problems", "1")], vec![single, empty]),
            (vec![("max_problems", "3")], vec![triple, single, empty]),
            (vec![("min_problems", "1"), ("max_problems", "1")], vec![single]),
        ];

        for (query, expected) in cases {
            let res = app.get_query(routes::CONTESTS, &query).await;
            assert_eq!(res.status, 200, "{}", res.text);
            assert_eq!(res.ids(), expected, "query {query:?}");
            assert_eq!(res.total(), expected.len() as u64, "query {query:?}");
        }
    }

    #[tokio::test]
    async fn negative_bounds_are_rejected() {
        let app = TestApp::spawn().await;

        for param in ["min_problems", "max_problems", "min_duration", "max_duration"] {
            let res = app.get_query(routes::CONTESTS, &[(param, "-1")]).await;
            assert_eq!(res.status, 400, "{param}");
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }
    }
}

mod lookup {
    use super::*;

    #[tokio::test]
    async fn contest_lists_its_problems_by_index() {
        let app = TestApp::spawn().await;
        let id = app.insert_contest(500, "Round 500", Some(at(100)), Some(120)).await;
        app.insert_problem(id, "B", "Second", Some(1500), &[]).await;
        app.insert_problem(id, "A", "First", None, &[]).await;

        let res = app.get(&routes::contest(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "Round 500");
        assert_eq!(res.body["duration"], 120);
        let indexes: Vec<&str> = res.body["problems"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["index"].as_str().unwrap())
            .collect();
        assert_eq!(indexes, vec!["A", "B"]);
        assert!(res.body["problems"][0]["rating"].is_null());
    }

    #[tokio::test]
    async fn unknown_contest_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::contest(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod contest_problems {
    use super::*;

    #[tokio::test]
    async fn ordered_by_rating_ascending_including_unrated() {
        let app = TestApp::spawn().await;
        let id = app.insert_contest(500, "Round", Some(at(100)), None).await;
        let hard = app.insert_problem(id, "C", "Hard", Some(2400), &["dp"]).await;
        let easy = app.insert_problem(id, "A", "Easy", Some(800), &["math"]).await;
        let unrated = app.insert_problem(id, "B", "New", None, &[]).await;

        let res = app.get(&routes::contest_problems(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.total(), 3);
        let ids = res.ids();
        assert!(ids.contains(&(unrated as i64)));
        let rated: Vec<i64> = ids.into_iter().filter(|&i| i != unrated as i64).collect();
        assert_eq!(rated, vec![easy as i64, hard as i64]);
    }

    #[tokio::test]
    async fn rating_bound_excludes_unrated() {
        let app = TestApp::spawn().await;
        let id = app.insert_contest(500, "Round", Some(at(100)), None).await;
        let mid = app.insert_problem(id, "A", "Mid", Some(1400), &[]).await;
        app.insert_problem(id, "B", "New", None, &[]).await;

        let res = app
            .get_query(&routes::contest_problems(id), &[("max_rating", "3000")])
            .await;

        assert_eq!(res.ids(), vec![mid as i64]);
    }

    #[tokio::test]
    async fn solved_count_is_scoped_to_the_contest() {
        let app = TestApp::spawn().await;
        let first = app.insert_contest(500, "Div 1", Some(at(100)), None).await;
        let second = app.insert_contest(501, "Div 2", Some(at(100)), None).await;
        let shared = app.insert_problem(first, "A", "Shared", Some(1000), &[]).await;
        let other = app.insert_problem(first, "B", "Other", Some(1100), &[]).await;
        app.link(shared, second).await;
        app.set_solved(shared, first, 10).await;
        app.set_solved(shared, second, 5000).await;
        app.set_solved(other, first, 900).await;

        let res = app
            .get_query(&routes::contest_problems(first), &[("min_solved_count", "100")])
            .await;

        assert_eq!(res.ids(), vec![other as i64]);
        assert_eq!(res.body["data"][0]["solved_count"], 900);
    }

    #[tokio::test]
    async fn tags_filter_applies_within_the_contest() {
        let app = TestApp::spawn().await;
        let id = app.insert_contest(500, "Round", Some(at(100)), None).await;
        let both = app.insert_problem(id, "A", "Both", Some(800), &["math", "dp"]).await;
        app.insert_problem(id, "B", "Math", Some(900), &["math"]).await;

        let res = app
            .get_query(&routes::contest_problems(id), &[("tags", "dp,math")])
            .await;

        assert_eq!(res.ids(), vec![both as i64]);
        assert_eq!(res.body["data"][0]["tags"], serde_json::json!(["dp", "math"]));
    }

    #[tokio::test]
    async fn no_matching_problems_is_an_empty_page() {
        let app = TestApp::spawn().await;
        let id = app.insert_contest(500, "Round", Some(at(100)), None).await;

        let res = app.get(&routes::contest_problems(id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.total(), 0);

        app.insert_problem(id, "A", "Easy", Some(800), &[]).await;
        let res = app
            .get_query(&routes::contest_problems(id), &[("min_rating", "3000")])
            .await;
        assert_eq!(res.status, 200);
        assert!(res.ids().is_empty());
    }

    #[tokio::test]
    async fn unknown_contest_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::contest_problems(4242)).await;

        assert_eq!(res.status, 404);
    }
}
