//! services/dashboard/src/lib.rs
//!
//! The student LMS dashboard client: session store, authenticated request
//! layer with one-shot token refresh, typed endpoint operations, and the
//! thin view controllers over them.

pub mod adapters;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod guard;
pub mod session;
pub mod views;

pub use client::ApiClient;
pub use config::Config;
pub use error::ClientError;
pub use guard::Route;
pub use session::SessionStore;
