//! services/dashboard/src/error.rs
//!
//! Defines the primary error type for the entire dashboard service.

use crate::config::ConfigError;
use student_lms_core::ports::PortError;

/// The primary error type for the `dashboard` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// A non-2xx response, interpreted at the view boundary. The message is
    /// taken from the response body when the server supplied one.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// A response body that did not match any accepted shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl ClientError {
    /// True when the caller should drop back to the login screen.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::Port(PortError::AuthExpired))
    }
}
