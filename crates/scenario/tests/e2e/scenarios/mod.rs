//! E2E scenario test modules.
//!
//! - `lifecycle_flow` -- the lifecycle scenario against a correct service
//! - `fault_detection` -- service faults surface as counted failures
//! - `http_flow` -- the scenario over HTTP against the axum fake service

mod fault_detection;
mod http_flow;

use flaircheck_core::types::{AuthToken, Variant};
use flaircheck_scenario::ScenarioContext;

pub(crate) const COMMUNITY: &str = "http://localhost/c/play";
pub(crate) const USER: &str = "http://localhost/u/Nerd02";
pub(crate) const TOKEN: &str = "test-jwt";

pub(crate) fn anonymous() -> ScenarioContext {
    ScenarioContext {
        community: COMMUNITY.to_owned(),
        user: USER.to_owned(),
        token: None,
        variant: Variant::Anonymous,
    }
}

pub(crate) fn authenticated() -> ScenarioContext {
    ScenarioContext {
        community: COMMUNITY.to_owned(),
        user: USER.to_owned(),
        token: Some(AuthToken::new(TOKEN)),
        variant: Variant::Authenticated,
    }
}
