//! The lifecycle scenario over HTTP.
//!
//! Runs `HttpFlairClient` against the axum fake service so request shaping,
//! decoding and the runner are exercised together.

use crate::helpers::fake_service::FakeService;
use crate::helpers::store::{FlairStore, StoreFaults};

use flaircheck_client::{HttpFlairClient, HttpTransport};
use flaircheck_scenario::{NoopObserver, Runner, flair_lifecycle};

use super::{TOKEN, anonymous, authenticated};

fn client(service: &FakeService) -> HttpFlairClient {
    let transport = HttpTransport::with_base_url(&service.base_url).expect("valid base url");
    HttpFlairClient::new(transport).with_instance_domain(Some("localhost".to_owned()))
}

#[tokio::test]
async fn test_e2e_http_lifecycle_passes() {
    // Given: A fake service without token enforcement
    let service = FakeService::start(FlairStore::new(), None).await;
    let runner = Runner::new(client(&service), anonymous());

    // When: Running the scenario over HTTP
    let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;

    // Then: Everything passes and the service is clean afterwards
    assert!(
        report.tally.all_passed(),
        "failures: {:?}",
        report.failures().collect::<Vec<_>>()
    );
    assert!(service.with_store(FlairStore::is_pristine));
}

#[tokio::test]
async fn test_e2e_http_authenticated_lifecycle_passes() {
    let service = FakeService::start(FlairStore::new(), Some(TOKEN)).await;
    let runner = Runner::new(client(&service), authenticated());

    let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;

    assert!(
        report.tally.all_passed(),
        "failures: {:?}",
        report.failures().collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_e2e_http_missing_token_is_rejected() {
    let service = FakeService::start(FlairStore::new(), Some(TOKEN)).await;
    let runner = Runner::new(client(&service), anonymous());

    let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;

    assert!(!report.tally.all_passed());
    assert!(report.steps[0].passed, "probe needs no token");
    assert!(service.with_store(FlairStore::is_pristine));
}

#[tokio::test]
async fn test_e2e_http_missing_cascade_is_detected() {
    let store = FlairStore::with_faults(StoreFaults {
        no_cascade: true,
        ..StoreFaults::default()
    });
    let service = FakeService::start(store, None).await;
    let runner = Runner::new(client(&service), anonymous());

    let report = runner.run(&flair_lifecycle(), &mut NoopObserver).await;

    let failed: Vec<_> = report.failures().map(|step| step.index).collect();
    assert_eq!(failed, vec![23]);
}
