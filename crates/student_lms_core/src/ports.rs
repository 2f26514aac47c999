//! crates/student_lms_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the client's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! request layer to be independent of the concrete HTTP stack and of how the
//! session slice is persisted.

use crate::domain::Session;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// A transport-level failure: the request never produced a response.
    #[error("Network error: {0}")]
    Network(String),
    /// The persisted session slice could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(String),
    /// A 401 survived the refresh path; the session has been cleared.
    #[error("Authentication expired, please log in again")]
    AuthExpired,
    /// A required identifier was missing from the caller's input.
    #[error("Validation error: {0}")]
    Validation(String),
    /// The server data does not contain the requested item.
    #[error("Item not found: {0}")]
    NotFound(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// HTTP Wire Types
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// An outbound request, fully assembled by the request layer.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Header name/value pairs, in send order.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// A response as seen by the request layer: status plus raw body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Deserializes the body into the caller's expected shape.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends one request and returns the response, whatever its status.
    /// Only transport-level failures are errors.
    async fn send(&self, request: HttpRequest) -> PortResult<HttpResponse>;
}

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads the persisted session slice, if any.
    async fn load(&self) -> PortResult<Option<Session>>;

    /// Durably replaces the persisted session slice.
    async fn save(&self, session: &Session) -> PortResult<()>;
}
