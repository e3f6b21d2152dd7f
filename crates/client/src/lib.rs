//! HTTP client for the flair service.
//!
//! - [`transport`]: request shaping over reqwest (query/body encoding, bearer
//!   header, liveness probe)
//! - [`api`]: the [`FlairApi`] operations and their HTTP implementation

pub mod api;
pub mod error;
pub mod transport;
mod wire;

pub use api::{FlairApi, HttpFlairClient};
pub use error::ClientError;
pub use transport::{API_PREFIX, DEFAULT_BASE_URL, HttpTransport, RawResponse, Resource};
