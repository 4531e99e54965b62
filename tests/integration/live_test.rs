//! Checks against the public JSONPlaceholder service.
//!
//! These need network access and are ignored by default. Run them with
//! `cargo test -- --ignored`; `POSTS_API_BASE_URL` points them elsewhere.

use posts_api_check::config::{ApiClientConfig, ENV_BASE_URL};
use posts_api_check::scenario::ScenarioRunner;
use posts_api_check::suite::posts_suite;
use posts_api_check::PostsClient;

fn live_config() -> ApiClientConfig {
    let mut config = ApiClientConfig::default();
    if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    config
}

#[test]
#[ignore = "requires network access"]
fn test_live_suite() {
    let config = live_config();
    let client = PostsClient::from_config(&config).unwrap();
    let scenarios = posts_suite(&config).unwrap();

    let report = ScenarioRunner::new(&client).run_all(&scenarios);

    assert!(report.is_success(), "{}", report);
}

#[test]
#[ignore = "requires network access"]
fn test_live_unknown_post_body() {
    let client = PostsClient::from_config(&live_config()).unwrap();

    let response = client.get_post(101).unwrap();

    assert_eq!(response.status_code, 404);
    assert!(response.is_body_empty());
}
