//! Observer that records every callback.

use flaircheck_core::types::Variant;
use flaircheck_scenario::{CleanupRecord, StepObserver, StepRecord};

#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub runs: Vec<(Variant, u32)>,
    pub steps: Vec<StepRecord>,
    pub cleanup: Vec<CleanupRecord>,
}

impl StepObserver for RecordingObserver {
    fn on_run_start(&mut self, variant: Variant, iteration: u32) {
        self.runs.push((variant, iteration));
    }

    fn on_step(&mut self, record: &StepRecord) {
        self.steps.push(record.clone());
    }

    fn on_cleanup(&mut self, record: &CleanupRecord) {
        self.cleanup.push(record.clone());
    }
}
