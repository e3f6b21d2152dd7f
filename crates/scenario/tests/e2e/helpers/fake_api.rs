//! In-memory `FlairApi` fake.
//!
//! Clones share state, so a test can hand one clone to the runner and
//! inspect the store and call log through another.

use std::sync::{Arc, Mutex};

use flaircheck_client::{ClientError, FlairApi};
use flaircheck_core::types::{AuthToken, Flair, Reachability};

use super::store::{FlairStore, StoreFaults};

/// One call the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: &'static str,
    pub token: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    store: FlairStore,
    calls: Vec<Call>,
    offline: bool,
    broken_user_flair: bool,
    required_token: Option<String>,
}

/// Fake flair service operating on a [`FlairStore`].
#[derive(Debug, Clone, Default)]
pub struct FakeFlairApi {
    inner: Arc<Mutex<Inner>>,
}

#[allow(dead_code)]
impl FakeFlairApi {
    /// A correct, reachable service.
    pub fn healthy() -> Self {
        Self::default()
    }

    /// A service with the given faults.
    pub fn with_faults(faults: StoreFaults) -> Self {
        let api = Self::default();
        api.lock().store = FlairStore::with_faults(faults);
        api
    }

    /// A service nobody answers for: probe is unreachable, every call fails.
    pub fn offline() -> Self {
        let api = Self::default();
        api.lock().offline = true;
        api
    }

    /// User flair lookups return a body that does not decode.
    pub fn with_broken_user_flair(self) -> Self {
        self.lock().broken_user_flair = true;
        self
    }

    /// Mutations without this bearer token are rejected.
    pub fn requiring_token(self, token: &str) -> Self {
        self.lock().required_token = Some(token.to_owned());
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Run `f` against the store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut FlairStore) -> R) -> R {
        f(&mut self.lock().store)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("fake api lock poisoned")
    }

    /// Log the call and fail it when offline.
    fn enter(
        &self,
        operation: &'static str,
        token: Option<&AuthToken>,
    ) -> Result<std::sync::MutexGuard<'_, Inner>, ClientError> {
        let mut inner = self.lock();
        inner.calls.push(Call {
            operation,
            token: token.map(|t| t.expose().to_owned()),
        });
        if inner.offline {
            return Err(ClientError::Transport {
                reason: "connection refused".to_owned(),
            });
        }
        Ok(inner)
    }
}

fn authorized(inner: &Inner, token: Option<&AuthToken>) -> bool {
    match &inner.required_token {
        Some(required) => token.is_some_and(|t| t.expose() == required),
        None => true,
    }
}

impl FlairApi for FakeFlairApi {
    async fn probe(&self) -> Reachability {
        match self.enter("probe", None) {
            Ok(_) => Reachability::Online,
            Err(error) => Reachability::Unreachable {
                reason: error.to_string(),
            },
        }
    }

    async fn list_flairs(&self, community: &str, mod_only: bool) -> Result<Vec<Flair>, ClientError> {
        let inner = self.enter("list_flairs", None)?;
        Ok(inner.store.list(community, mod_only))
    }

    async fn upsert_flair(
        &self,
        community: &str,
        flair: &Flair,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let mut inner = self.enter("upsert_flair", token)?;
        if !authorized(&inner, token) {
            return Ok(false);
        }
        Ok(inner.store.upsert(community, flair))
    }

    async fn delete_flair(
        &self,
        community: &str,
        name: &str,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let mut inner = self.enter("delete_flair", token)?;
        if !authorized(&inner, token) {
            return Ok(false);
        }
        Ok(inner.store.delete(community, name))
    }

    async fn user_flair(&self, community: &str, user: &str) -> Result<Option<Flair>, ClientError> {
        let inner = self.enter("user_flair", None)?;
        if inner.broken_user_flair {
            return Err(ClientError::Decode {
                reason: "expected value at line 1 column 1".to_owned(),
            });
        }
        Ok(inner.store.user_flair(community, user))
    }

    async fn assign_user_flair(
        &self,
        community: &str,
        user: &str,
        flair_name: &str,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let mut inner = self.enter("assign_user_flair", token)?;
        if !authorized(&inner, token) {
            return Ok(false);
        }
        Ok(inner.store.assign(community, user, flair_name))
    }

    async fn unassign_user_flair(
        &self,
        community: &str,
        user: &str,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let mut inner = self.enter("unassign_user_flair", token)?;
        if !authorized(&inner, token) {
            return Ok(false);
        }
        Ok(inner.store.unassign(community, user))
    }

    async fn list_communities(&self) -> Result<Vec<String>, ClientError> {
        let inner = self.enter("list_communities", None)?;
        Ok(inner.store.communities())
    }
}
