//! Parameterized scenario runner.
//!
//! A [`Scenario`] is a named list of cases. A parameterized scenario holds
//! one case per input row and runs the same check for each. The
//! [`ScenarioRunner`] executes cases one after another and records every
//! outcome on its own: a failing, erroring or panicking case never stops the
//! cases after it.

pub mod fixtures;
pub mod report;

pub use fixtures::{FilterRow, FixtureError};
pub use report::{CaseOutcome, CaseStatus, ScenarioReport, SuiteReport};

use crate::assertions::AssertionError;
use crate::client::{PostsClient, RequestError};
use chrono::Utc;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;

/// Why a single case failed.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("request failed: {0}")]
    Request(#[from] RequestError),

    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionError),
}

type Check = Rc<dyn Fn(&PostsClient) -> Result<(), CaseError>>;

/// One executable case of a scenario.
pub struct Case {
    label: String,
    check: Check,
}

impl Case {
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Case").field("label", &self.label).finish()
    }
}

/// A named group of independent cases.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    cases: Vec<Case>,
}

impl Scenario {
    /// A scenario with one case.
    pub fn single<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&PostsClient) -> Result<(), CaseError> + 'static,
    {
        let name = name.into();
        Self {
            cases: vec![Case {
                label: name.clone(),
                check: Rc::new(check),
            }],
            name,
        }
    }

    /// A scenario with one case per row. Each case is labelled with the
    /// row's `Display` output and runs `check` against that row.
    pub fn parameterized<R, I, F>(name: impl Into<String>, rows: I, check: F) -> Self
    where
        R: fmt::Display + 'static,
        I: IntoIterator<Item = R>,
        F: Fn(&PostsClient, &R) -> Result<(), CaseError> + 'static,
    {
        let check = Rc::new(check);
        let cases = rows
            .into_iter()
            .map(|row| {
                let check = Rc::clone(&check);
                Case {
                    label: row.to_string(),
                    check: Rc::new(move |client: &PostsClient| (*check)(client, &row)),
                }
            })
            .collect();

        Self {
            name: name.into(),
            cases,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }
}

/// Runs scenarios against one client.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioRunner<'a> {
    client: &'a PostsClient,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(client: &'a PostsClient) -> Self {
        Self { client }
    }

    /// Runs every case of `scenario` in order.
    pub fn run(&self, scenario: &Scenario) -> ScenarioReport {
        log::info!(
            "Running scenario {} ({} cases)",
            scenario.name,
            scenario.cases.len()
        );

        let started_at = Utc::now();
        let outcomes = scenario
            .cases
            .iter()
            .map(|case| self.run_case(case))
            .collect();

        ScenarioReport {
            scenario: scenario.name.clone(),
            started_at,
            outcomes,
        }
    }

    /// Runs every scenario in order.
    pub fn run_all(&self, scenarios: &[Scenario]) -> SuiteReport {
        let started_at = Utc::now();
        let reports = scenarios.iter().map(|s| self.run(s)).collect();
        SuiteReport {
            started_at,
            reports,
        }
    }

    fn run_case(&self, case: &Case) -> CaseOutcome {
        let started = Instant::now();
        let result = panic::catch_unwind(AssertUnwindSafe(|| (*case.check)(self.client)));
        let duration = started.elapsed();

        let status = match result {
            Ok(Ok(())) => CaseStatus::Passed,
            Ok(Err(err)) => CaseStatus::Failed(err.to_string()),
            Err(payload) => CaseStatus::Failed(format!("panicked: {}", panic_message(&payload))),
        };

        match &status {
            CaseStatus::Passed => log::info!("  [PASS] {}", case.label),
            CaseStatus::Failed(message) => log::warn!("  [FAIL] {}: {}", case.label, message),
        }

        CaseOutcome {
            label: case.label.clone(),
            status,
            duration,
        }
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
