//! services/dashboard/src/adapters/fake.rs
//!
//! In-memory implementations of the ports, used by the test suites to script
//! server behavior and observe what the request layer puts on the wire.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use student_lms_core::domain::Session;
use student_lms_core::ports::{
    HttpRequest, HttpResponse, HttpTransport, PortError, PortResult, SessionStorage,
};

//=========================================================================================
// FakeTransport
//=========================================================================================

/// A transport that replays a scripted queue of responses and records every
/// request it was asked to send.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<PortResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response with the given status and body.
    pub fn enqueue(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
    }

    /// Queues a connection-level failure.
    pub fn enqueue_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(PortError::Network(message.to_string())));
    }

    /// Everything sent so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> PortResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PortError::Network("no scripted response".to_string())))
    }
}

//=========================================================================================
// MemorySessionStorage
//=========================================================================================

/// A `SessionStorage` that keeps the persisted slice in memory.
#[derive(Default)]
pub struct MemorySessionStorage {
    session: Mutex<Option<Session>>,
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> PortResult<Option<Session>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &Session) -> PortResult<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }
}
