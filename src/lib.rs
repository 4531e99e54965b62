//! Contract checks for the JSONPlaceholder posts collection.
//!
//! The crate issues GET requests against `/posts` and `/posts/{id}` and
//! checks status codes, content type, JSON shape and field content of what
//! comes back.
//!
//! # Architecture
//!
//! - **config**: settings (base address, timeouts, fixture location) and the
//!   process-wide holder they live in
//! - **models**: the post record, the query filter and the response wrapper
//! - **client**: the base request specification and the blocking client
//! - **assertions**: status, content type, schema and field-level checks
//! - **scenario**: the parameterized runner, CSV fixtures and reports
//! - **suite**: the catalogue of posts checks
//!
//! # Usage
//!
//! ```no_run
//! use posts_api_check::client::PostsClient;
//! use posts_api_check::config::ApiClientConfig;
//! use posts_api_check::scenario::ScenarioRunner;
//! use posts_api_check::suite::posts_suite;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiClientConfig::default();
//! let client = PostsClient::from_config(&config)?;
//! let scenarios = posts_suite(&config)?;
//!
//! let report = ScenarioRunner::new(&client).run_all(&scenarios);
//! println!("{}", report);
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod client;
pub mod config;
pub mod models;
pub mod scenario;
pub mod suite;

pub use assertions::{AssertionError, JsonSchema, ResponseSpec, ValidatableResponse};
pub use client::{PostsClient, RequestError, RequestSpec};
pub use config::ApiClientConfig;
pub use models::{ApiResponse, Post, PostFilter};
pub use scenario::{CaseError, Scenario, ScenarioRunner, SuiteReport};
