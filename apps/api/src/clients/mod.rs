//! Outbound API clients.
//!
//! Two collaborators live outside the process: the geocoding service that
//! resolves profile addresses to coordinates, and the hosted
//! generative-language model behind the shop-assistant chat. Both are thin
//! reqwest wrappers; parsing is split into pure functions so it can be
//! tested without a network.

pub mod assistant;
pub mod geocoding;

pub use assistant::AssistantClient;
pub use geocoding::GeocodingClient;

/// Failures talking to an outbound collaborator.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, timeout, connection refused).
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The collaborator answered with a non-success status.
    #[error("Upstream returned status {status}")]
    Status { status: u16 },

    /// The collaborator answered 2xx but the payload had no usable content.
    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),
}
