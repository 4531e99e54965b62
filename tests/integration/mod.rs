//! Integration tests for the posts checks.
//!
//! Everything except `live_test` runs against the in-process fake backend
//! from `common`.

pub mod live_test;
pub mod posts_api_test;
pub mod suite_test;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
