//! Runs the whole posts suite against fake backends.

use crate::common::{FakePostsApi, FakeServer};
use posts_api_check::scenario::{CaseStatus, ScenarioRunner};
use posts_api_check::suite::{posts_suite, select, SCENARIO_NAMES};

#[test]
fn test_suite_passes_against_conforming_backend() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();
    let scenarios = posts_suite(&server.config()).unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    assert!(report.is_success(), "unexpected failures:\n{}", report);
    assert_eq!(report.total(), 29);
    assert_eq!(report.reports.len(), SCENARIO_NAMES.len());
}

#[test]
fn test_filter_failures_stay_per_case() {
    let server = FakeServer::start(FakePostsApi::ignoring_filters());
    let client = server.client();
    let scenarios = posts_suite(&server.config()).unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    assert_eq!(report.passed(), 9, "{}", report);
    assert_eq!(report.failed(), 20, "{}", report);

    for name in ["get_all_posts", "get_post_by_valid_id", "get_post_by_invalid_id"] {
        assert!(report.report(name).unwrap().is_success(), "{} failed", name);
    }

    let invalid_ids = report.report("filter_by_invalid_id").unwrap();
    assert_eq!(invalid_ids.failed(), 4);
    for outcome in invalid_ids.failures() {
        match &outcome.status {
            CaseStatus::Failed(message) => {
                assert_eq!(
                    message,
                    "assertion failed: expected 0 records, got 100"
                );
            }
            CaseStatus::Passed => unreachable!(),
        }
    }

    let limits = report.report("limit_results").unwrap();
    let labels: Vec<&str> = limits.failures().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "5"]);
}

#[test]
fn test_duplicate_records_for_one_id_fail() {
    let server = FakeServer::start(FakePostsApi::duplicating_records());
    let client = server.client();
    let scenarios = select(
        posts_suite(&server.config()).unwrap(),
        &[
            "filter_by_valid_id".to_string(),
            "filter_by_combined_parameters".to_string(),
        ],
    )
    .unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    let by_id = report.report("filter_by_valid_id").unwrap();
    assert_eq!(by_id.failed(), 3, "{}", report);
    for outcome in by_id.failures() {
        assert_eq!(
            outcome.status,
            CaseStatus::Failed("assertion failed: expected at most 1 records, got 2".to_string())
        );
    }

    let combined = report.report("filter_by_combined_parameters").unwrap();
    let labels: Vec<&str> = combined.failures().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["id=5&userId=1"]);
}

#[test]
fn test_content_type_mismatch_fails_every_case() {
    let server = FakeServer::start(FakePostsApi::with_content_type("application/xml"));
    let client = server.client();
    let scenarios = posts_suite(&server.config()).unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    assert_eq!(report.passed(), 0);
    assert_eq!(report.failed(), 29);
    let scenario = report.report("get_all_posts").unwrap();
    let outcome = &scenario.outcomes[0];
    assert!(matches!(
        &outcome.status,
        CaseStatus::Failed(message) if message.contains("application/xml")
    ));
}

#[test]
fn test_selected_scenarios_only() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();
    let scenarios = select(
        posts_suite(&server.config()).unwrap(),
        &["get_post_by_invalid_id".to_string()],
    )
    .unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    assert_eq!(report.reports.len(), 1);
    assert_eq!(report.total(), 5);
    assert!(report.is_success());
}

#[test]
fn test_unreachable_backend_reports_request_failures() {
    let config = posts_api_check::ApiClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: 2000,
        log_exchanges: false,
        ..Default::default()
    };
    let client = posts_api_check::PostsClient::from_config(&config).unwrap();
    let scenarios = select(
        posts_suite(&config).unwrap(),
        &["get_all_posts".to_string()],
    )
    .unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    assert_eq!(report.failed(), 1);
    let outcome = &report.reports[0].outcomes[0];
    assert!(matches!(
        &outcome.status,
        CaseStatus::Failed(message) if message.starts_with("request failed:")
    ));
}

#[test]
fn test_report_serializes_to_json() {
    let server = FakeServer::start(FakePostsApi::new());
    let client = server.client();
    let scenarios = select(
        posts_suite(&server.config()).unwrap(),
        &["limit_results".to_string()],
    )
    .unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);
    let json = serde_json::to_value(&report).unwrap();

    let outcomes = &json["reports"][0]["outcomes"];
    assert_eq!(outcomes.as_array().unwrap().len(), 2);
    assert_eq!(outcomes[0]["status"]["status"], "passed");
}
