//! Reqwest-backed transport for the flair service.
//!
//! This layer owns request shaping only: endpoint URLs, query and JSON body
//! encoding, the bearer header, and turning a response into a
//! [`RawResponse`]. Interpreting the response is left to the operations in
//! [`crate::api`].

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use flaircheck_core::types::{AuthToken, Reachability};

use crate::error::ClientError;

/// Where a locally started flair service listens.
pub const DEFAULT_BASE_URL: &str = "http://localhost:6969";

/// Path prefix shared by every API resource.
pub const API_PREFIX: &str = "/api/v1";

const JSON_CONTENT_TYPE: &str = "application/json";

/// API resources exposed by the flair service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Flairs defined by a community.
    CommunityFlairs,
    /// The flair assigned to a user within a community.
    UserFlair,
    /// Communities that have at least one flair.
    Communities,
}

impl Resource {
    /// Path segment below [`API_PREFIX`].
    pub fn path(self) -> &'static str {
        match self {
            Self::CommunityFlairs => "community",
            Self::UserFlair => "user",
            Self::Communities => "communities",
        }
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Whether the service answered with a 2xx status.
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the JSON body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] for a non-2xx response and
    /// [`ClientError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if !self.is_ok() {
            return Err(ClientError::Status {
                status: self.status.as_u16(),
                body: body_preview(&self.body),
            });
        }

        serde_json::from_str(&self.body).map_err(|error| ClientError::Decode {
            reason: format!("{error} (body: {})", body_preview(&self.body)),
        })
    }
}

/// HTTP transport bound to one flair service instance.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Transport for the service at [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Transport for a service listening at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when `base_url` does not parse.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|error| ClientError::InvalidUrl {
            url: base_url.to_owned(),
            reason: error.to_string(),
        })?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an API resource.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] when the join fails.
    pub fn endpoint(&self, resource: Resource) -> Result<Url, ClientError> {
        let path = format!("{API_PREFIX}/{}", resource.path());
        self.base_url
            .join(&path)
            .map_err(|error| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, path.trim_start_matches('/')),
                reason: error.to_string(),
            })
    }

    /// Issue a GET with `query` serialized as URL-encoded `key=value` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the request cannot complete.
    /// Non-2xx answers are returned as a [`RawResponse`].
    pub async fn get<Q>(&self, resource: Resource, query: &Q) -> Result<RawResponse, ClientError>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(resource)?;
        debug!(method = "GET", %url, "sending request");

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .query(query)
            .send()
            .await?;

        read_response(response).await
    }

    /// Issue a mutating request (PUT or DELETE) with a JSON body.
    ///
    /// When `token` is given, `authorization: Bearer <token>` is attached.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the request cannot complete.
    /// Non-2xx answers are returned as a [`RawResponse`].
    pub async fn send<B>(
        &self,
        method: Method,
        resource: Resource,
        body: &B,
        token: Option<&AuthToken>,
    ) -> Result<RawResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(resource)?;
        debug!(method = %method, %url, authenticated = token.is_some(), "sending request");

        let mut request = self.client.request(method, url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose());
        }

        let response = request.send().await?;
        read_response(response).await
    }

    /// Header-only request to the service root.
    ///
    /// Never fails: connection faults become [`Reachability::Unreachable`].
    pub async fn probe(&self) -> Reachability {
        match self.client.head(self.base_url.clone()).send().await {
            Ok(response) if response.status().is_success() => Reachability::Online,
            Ok(response) => Reachability::Unhealthy {
                status: response.status().as_u16(),
            },
            Err(error) => {
                debug!(error = %error, "liveness probe failed");
                Reachability::Unreachable {
                    reason: error.to_string(),
                }
            }
        }
    }
}

async fn read_response(response: Response) -> Result<RawResponse, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "received response");
    Ok(RawResponse { status, body })
}

fn body_preview(body: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
