//! Result aggregate of scenario runs.
//!
//! The runner owns no global counters: every run returns a [`RunReport`],
//! and reports from several runs combine through [`Tally::merge`].

use serde::Serialize;

use flaircheck_core::types::Variant;

/// Pass/fail counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    /// Count one assertion outcome.
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Add the counts of `other`.
    pub fn merge(&mut self, other: &Tally) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
    }

    /// No assertion failed. An empty tally counts as passing.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Outcome of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    /// 1-based position in the scenario.
    pub index: usize,
    pub label: String,
    pub passed: bool,
    /// Mismatch or error text of a failed step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Outcome of one cleanup action. Not part of the tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupRecord {
    pub action: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Everything one run of a scenario produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub variant: Variant,
    /// 1-based repetition number.
    pub iteration: u32,
    pub steps: Vec<StepRecord>,
    pub cleanup: Vec<CleanupRecord>,
    pub tally: Tally,
}

impl RunReport {
    /// Records of the failed steps, in order.
    pub fn failures(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|step| !step.passed)
    }
}

/// Receives records while a run is in progress.
///
/// Purely observational: nothing an observer does influences the run.
pub trait StepObserver {
    /// Called before the first step.
    fn on_run_start(&mut self, _variant: Variant, _iteration: u32) {}

    /// Called as soon as a step has been evaluated.
    fn on_step(&mut self, record: &StepRecord);

    /// Called for each cleanup action.
    fn on_cleanup(&mut self, _record: &CleanupRecord) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _record: &StepRecord) {}
}
