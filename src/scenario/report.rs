//! Outcomes of scenario runs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed(String),
}

impl CaseStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }
}

/// Outcome of one case: its label, its status and how long it ran.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub label: String,
    pub status: CaseStatus,
    pub duration: Duration,
}

/// Outcomes of every case of one scenario, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: String,
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<CaseOutcome>,
}

impl ScenarioReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Outcomes of the failed cases.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.status.is_passed())
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}/{} passed)",
            self.scenario,
            self.passed(),
            self.outcomes.len()
        )?;
        for outcome in &self.outcomes {
            match &outcome.status {
                CaseStatus::Passed => writeln!(
                    f,
                    "  ok    {} [{} ms]",
                    outcome.label,
                    outcome.duration.as_millis()
                )?,
                CaseStatus::Failed(message) => writeln!(
                    f,
                    "  FAIL  {} [{} ms]\n        {}",
                    outcome.label,
                    outcome.duration.as_millis(),
                    message
                )?,
            }
        }
        Ok(())
    }
}

/// Reports of every scenario in a run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub reports: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.reports.iter().map(|r| r.outcomes.len()).sum()
    }

    pub fn passed(&self) -> usize {
        self.reports.iter().map(ScenarioReport::passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn report(&self, scenario: &str) -> Option<&ScenarioReport> {
        self.reports.iter().find(|r| r.scenario == scenario)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Run started {}",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        for report in &self.reports {
            write!(f, "\n{}", report)?;
        }
        write!(
            f,
            "\n{} cases: {} passed, {} failed",
            self.total(),
            self.passed(),
            self.failed()
        )
    }
}
