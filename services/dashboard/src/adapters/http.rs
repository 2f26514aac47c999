//! services/dashboard/src/adapters/http.rs
//!
//! This module contains the HTTP adapter, which is the concrete implementation
//! of the `HttpTransport` port from the `core` crate. It performs real network
//! calls using `reqwest`.

use async_trait::async_trait;
use student_lms_core::ports::{HttpRequest, HttpResponse, HttpTransport, Method, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A transport adapter that implements the `HttpTransport` port using `reqwest`.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport` with the default client settings.
    /// No timeout is configured; the transport's defaults apply.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

//=========================================================================================
// `HttpTransport` Trait Implementation
//=========================================================================================

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> PortResult<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        // Only connection-level failures are errors; any response, whatever
        // its status, is handed back to the request layer.
        let response = builder
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
