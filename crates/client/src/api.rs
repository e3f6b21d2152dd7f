//! Flair service operations.
//!
//! [`FlairApi`] is the seam between the scenario runner and the service: one
//! method per capability. [`HttpFlairClient`] implements it over
//! [`HttpTransport`]; tests substitute in-memory fakes.

use std::future::Future;

use reqwest::Method;
use tracing::debug;

use flaircheck_core::types::{AuthToken, Flair, Reachability};

use crate::error::ClientError;
use crate::transport::{HttpTransport, Resource};
use crate::wire::{
    AssignUserFlairBody, DeleteFlairBody, ListFlairsQuery, UnassignUserFlairBody, UpsertFlairBody,
    UserFlairQuery,
};

/// Operations offered by the flair service.
///
/// Mutating operations report the service's verdict as a `bool` (`true` for
/// a 2xx answer). Read operations decode the response and fail on a non-2xx
/// answer or an unexpected body.
pub trait FlairApi: Send + Sync {
    /// Header-only liveness check of the service root.
    fn probe(&self) -> impl Future<Output = Reachability> + Send;

    /// Flairs of `community`. With `mod_only` set, the moderator listing.
    fn list_flairs(
        &self,
        community: &str,
        mod_only: bool,
    ) -> impl Future<Output = Result<Vec<Flair>, ClientError>> + Send;

    /// Create `flair` in `community`, or update the flair with the same name.
    fn upsert_flair(
        &self,
        community: &str,
        flair: &Flair,
        token: Option<&AuthToken>,
    ) -> impl Future<Output = Result<bool, ClientError>> + Send;

    /// Delete the flair called `name`; assignments to it resolve to none.
    fn delete_flair(
        &self,
        community: &str,
        name: &str,
        token: Option<&AuthToken>,
    ) -> impl Future<Output = Result<bool, ClientError>> + Send;

    /// Flair currently assigned to `user` in `community`, if any.
    fn user_flair(
        &self,
        community: &str,
        user: &str,
    ) -> impl Future<Output = Result<Option<Flair>, ClientError>> + Send;

    /// Assign the flair called `flair_name`, replacing any prior assignment.
    fn assign_user_flair(
        &self,
        community: &str,
        user: &str,
        flair_name: &str,
        token: Option<&AuthToken>,
    ) -> impl Future<Output = Result<bool, ClientError>> + Send;

    /// Remove the flair assignment of `user` in `community`.
    fn unassign_user_flair(
        &self,
        community: &str,
        user: &str,
        token: Option<&AuthToken>,
    ) -> impl Future<Output = Result<bool, ClientError>> + Send;

    /// Actor ids of communities that have flairs enabled.
    fn list_communities(&self) -> impl Future<Output = Result<Vec<String>, ClientError>> + Send;
}

/// [`FlairApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFlairClient {
    transport: HttpTransport,
    instance_domain: Option<String>,
}

impl HttpFlairClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self {
            transport,
            instance_domain: None,
        }
    }

    /// Send `instance_domain` with every mutating request.
    pub fn with_instance_domain(mut self, instance_domain: Option<String>) -> Self {
        self.instance_domain = instance_domain;
        self
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

impl FlairApi for HttpFlairClient {
    async fn probe(&self) -> Reachability {
        self.transport.probe().await
    }

    async fn list_flairs(&self, community: &str, mod_only: bool) -> Result<Vec<Flair>, ClientError> {
        let query = ListFlairsQuery {
            community_actor_id: community,
            mod_only,
        };
        let flairs: Vec<Flair> = self
            .transport
            .get(Resource::CommunityFlairs, &query)
            .await?
            .decode()?;
        debug!(community, mod_only, count = flairs.len(), "listed flairs");
        Ok(flairs)
    }

    async fn upsert_flair(
        &self,
        community: &str,
        flair: &Flair,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let body = UpsertFlairBody {
            name: &flair.name,
            display_name: &flair.display_name,
            path: flair.path.as_deref(),
            community_actor_id: community,
            mod_only: flair.mod_only,
            instance_domain: self.instance_domain.as_deref(),
        };
        let response = self
            .transport
            .send(Method::PUT, Resource::CommunityFlairs, &body, token)
            .await?;
        Ok(response.is_ok())
    }

    async fn delete_flair(
        &self,
        community: &str,
        name: &str,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let body = DeleteFlairBody {
            name,
            community_actor_id: community,
            instance_domain: self.instance_domain.as_deref(),
        };
        let response = self
            .transport
            .send(Method::DELETE, Resource::CommunityFlairs, &body, token)
            .await?;
        Ok(response.is_ok())
    }

    async fn user_flair(&self, community: &str, user: &str) -> Result<Option<Flair>, ClientError> {
        let query = UserFlairQuery {
            community_actor_id: community,
            user_actor_id: user,
        };
        self.transport
            .get(Resource::UserFlair, &query)
            .await?
            .decode()
    }

    async fn assign_user_flair(
        &self,
        community: &str,
        user: &str,
        flair_name: &str,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let body = AssignUserFlairBody {
            community_actor_id: community,
            user_actor_id: user,
            flair_name,
            instance_domain: self.instance_domain.as_deref(),
        };
        let response = self
            .transport
            .send(Method::PUT, Resource::UserFlair, &body, token)
            .await?;
        Ok(response.is_ok())
    }

    async fn unassign_user_flair(
        &self,
        community: &str,
        user: &str,
        token: Option<&AuthToken>,
    ) -> Result<bool, ClientError> {
        let body = UnassignUserFlairBody {
            community_actor_id: community,
            user_actor_id: user,
            instance_domain: self.instance_domain.as_deref(),
        };
        let response = self
            .transport
            .send(Method::DELETE, Resource::UserFlair, &body, token)
            .await?;
        Ok(response.is_ok())
    }

    async fn list_communities(&self) -> Result<Vec<String>, ClientError> {
        self.transport
            .get(Resource::Communities, &[] as &[(&str, &str)])
            .await?
            .decode()
    }
}
