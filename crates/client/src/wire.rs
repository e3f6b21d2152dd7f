//! Request payloads as the flair service expects them on the wire.
//!
//! Field names follow the service's JSON schema. Payloads borrow from the
//! caller; they only live for the duration of one request.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct ListFlairsQuery<'a> {
    pub community_actor_id: &'a str,
    pub mod_only: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserFlairQuery<'a> {
    pub community_actor_id: &'a str,
    pub user_actor_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpsertFlairBody<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub path: Option<&'a str>,
    pub community_actor_id: &'a str,
    pub mod_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_domain: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteFlairBody<'a> {
    pub name: &'a str,
    pub community_actor_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_domain: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignUserFlairBody<'a> {
    pub community_actor_id: &'a str,
    pub user_actor_id: &'a str,
    pub flair_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_domain: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UnassignUserFlairBody<'a> {
    pub community_actor_id: &'a str,
    pub user_actor_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_domain: Option<&'a str>,
}
