//! Service faults surface as counted failures.
//!
//! Validates that a faulty or unreachable service never aborts the run,
//! that each fault is pinned to the step that checks for it, and that
//! cleanup still executes.

use crate::helpers::fake_api::FakeFlairApi;
use crate::helpers::observer::RecordingObserver;
use crate::helpers::store::StoreFaults;

use flaircheck_scenario::{NoopObserver, RunReport, Runner, flair_lifecycle};

use super::anonymous;

fn failed_labels(report: &RunReport) -> Vec<&str> {
    report.failures().map(|step| step.label.as_str()).collect()
}

#[tokio::test]
async fn test_e2e_offline_service_fails_every_step_without_aborting() {
    // Given: Nothing answers
    let api = FakeFlairApi::offline();
    let runner = Runner::new(api.clone(), anonymous());
    let scenario = flair_lifecycle();
    let mut observer = RecordingObserver::default();

    // When: Running the scenario
    let report = runner.run(&scenario, &mut observer).await;

    // Then: All steps ran, all failed with a reason, cleanup was attempted
    assert_eq!(report.tally.total, scenario.steps.len());
    assert_eq!(report.tally.failed, scenario.steps.len());
    assert!(report.steps.iter().all(|step| step.detail.is_some()));
    assert!(
        report.steps[0]
            .detail
            .as_deref()
            .is_some_and(|detail| detail.contains("unreachable"))
    );
    assert_eq!(observer.cleanup.len(), scenario.cleanup.len());
    assert!(observer.cleanup.iter().all(|record| !record.succeeded));
}

#[tokio::test]
async fn test_e2e_missing_cascade_is_detected() {
    let api = FakeFlairApi::with_faults(StoreFaults {
        no_cascade: true,
        ..StoreFaults::default()
    });
    let runner = Runner::new(api, anonymous());

    let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;

    assert_eq!(report.tally.failed, 1);
    let failure = report.failures().next().expect("one failure");
    assert_eq!(failure.index, 23);
    assert_eq!(failure.label, "user is now unflaired");
}

#[tokio::test]
async fn test_e2e_duplicate_upsert_is_detected() {
    let api = FakeFlairApi::with_faults(StoreFaults {
        duplicate_upserts: true,
        ..StoreFaults::default()
    });
    let runner = Runner::new(api, anonymous());

    let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;

    let failed = failed_labels(&report);
    assert!(failed.contains(&"existing flair got updated"), "{failed:?}");
    assert!(failed.contains(&"update did not duplicate the flair"), "{failed:?}");
    assert!(failed.contains(&"mod flair got added"), "{failed:?}");
}

#[tokio::test]
async fn test_e2e_mod_flair_leak_is_detected() {
    let api = FakeFlairApi::with_faults(StoreFaults {
        leak_mod_flairs: true,
        ..StoreFaults::default()
    });
    let runner = Runner::new(api, anonymous());

    let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;

    assert_eq!(failed_labels(&report), vec!["mod flair hidden from public listing"]);
}

#[tokio::test]
async fn test_e2e_decode_failure_is_counted_and_run_continues() {
    // Given: User flair responses do not decode
    let api = FakeFlairApi::healthy().with_broken_user_flair();
    let runner = Runner::new(api.clone(), anonymous());
    let scenario = flair_lifecycle();

    // When: Running the scenario
    let report = runner.run(&scenario, &mut NoopObserver).await;

    // Then: Only user flair reads fail, with the decode error as detail
    let user_reads = scenario
        .steps
        .iter()
        .filter(|step| step.action == flaircheck_scenario::Action::GetUserFlair)
        .count();
    assert_eq!(report.tally.failed, user_reads);
    assert_eq!(report.tally.total, scenario.steps.len());
    for failure in report.failures() {
        let detail = failure.detail.as_deref().unwrap_or_default();
        assert!(detail.contains("decode"), "detail: {detail}");
    }
    assert!(api.with_store(|store| store.is_pristine()));
}
