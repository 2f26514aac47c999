//! services/dashboard/src/client.rs
//!
//! The authenticated request layer and the typed endpoint operations built
//! on top of it.
//!
//! Every call attaches the current bearer token, detects a 401, transparently
//! refreshes the token pair once, and retries the identical request exactly
//! once. The retried request never triggers a second refresh.

use crate::decode;
use crate::error::ClientError;
use crate::session::SessionStore;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use student_lms_core::domain::{
    CoinsHistoryPage, DashboardData, Group, Introduction, Student, StudentMarks, TransactionKind,
};
use student_lms_core::ports::{
    HttpRequest, HttpResponse, HttpTransport, Method, PortError, PortResult,
};
use tracing::{debug, info, warn};

/// The ordered refresh candidates. The server contract never pinned a
/// canonical refresh route, so the client walks this list and the first
/// success wins.
pub const REFRESH_PATHS: [&str; 3] = ["/api/auth/refresh", "/api/refresh", "/auth/refresh"];

//=========================================================================================
// Envelope Types
//=========================================================================================

/// The `{success, data, message}` wrapper most endpoints respond with.
#[derive(Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    user: Value,
    #[serde(rename = "accessToken")]
    access_token: String,
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

/// The refresh endpoints answer in either camelCase or snake_case.
#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(rename = "accessToken", alias = "access_token", default)]
    access_token: Option<String>,
    #[serde(rename = "refreshToken", alias = "refresh_token", default)]
    refresh_token: Option<String>,
}

//=========================================================================================
// The API Client
//=========================================================================================

pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: Arc<SessionStore>,
    base_url: String,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: Arc<SessionStore>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            session,
            base_url: base_url.into(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    //-------------------------------------------------------------------------------------
    // The Authenticated Request Layer
    //-------------------------------------------------------------------------------------

    /// Performs an authenticated GET against the configured origin.
    pub async fn get(&self, path: &str) -> PortResult<HttpResponse> {
        self.request(Method::Get, path, None, &[]).await
    }

    /// Performs an authenticated POST against the configured origin.
    pub async fn post(&self, path: &str, body: Value) -> PortResult<HttpResponse> {
        self.request(Method::Post, path, Some(body), &[]).await
    }

    /// Issues one request with the current bearer token, refreshing and
    /// retrying once on a 401.
    ///
    /// Ordinary non-2xx responses are returned as-is; callers inspect the
    /// status. The call only fails outright for transport errors or when the
    /// refresh path is exhausted (which also clears the session).
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: &[(&str, &str)],
    ) -> PortResult<HttpResponse> {
        let token = self.session.access_token().await;
        let response = self
            .send_once(method, path, body.as_ref(), extra_headers, token.as_deref())
            .await?;
        if !response.is_unauthorized() {
            return Ok(response);
        }

        debug!("Access token rejected for {}, refreshing...", path);
        let new_token = self.refresh_session().await?;

        // One retry with the fresh token. Its response is returned whatever
        // the status; a second 401 never refreshes again.
        self.send_once(method, path, body.as_ref(), extra_headers, Some(&new_token))
            .await
    }

    async fn send_once(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        extra_headers: &[(&str, &str)],
        token: Option<&str>,
    ) -> PortResult<HttpResponse> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in extra_headers {
            // The layer owns the Authorization header; callers cannot
            // override it.
            if name.eq_ignore_ascii_case("authorization") {
                continue;
            }
            match headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(existing) => existing.1 = value.to_string(),
                None => headers.push((name.to_string(), value.to_string())),
            }
        }
        if let Some(token) = token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body: body.map(|b| b.to_string()),
        };
        self.transport.send(request).await
    }

    /// Walks the refresh candidates in order, first success wins. Both a
    /// transport error and a non-2xx advance to the next candidate. When
    /// every candidate fails, the session is cleared and the whole refresh
    /// fails as a unit.
    async fn refresh_session(&self) -> PortResult<String> {
        let Some(refresh_token) = self.session.refresh_token().await else {
            warn!("No refresh token in the session, cannot refresh");
            self.clear_session_after_failed_refresh().await;
            return Err(PortError::AuthExpired);
        };

        let body = serde_json::json!({ "refreshToken": refresh_token });
        let mut last_failure: Option<String> = None;

        for path in REFRESH_PATHS {
            let request = HttpRequest {
                method: Method::Post,
                url: format!("{}{}", self.base_url, path),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: Some(body.to_string()),
            };
            let response = match self.transport.send(request).await {
                Ok(response) => response,
                Err(err) => {
                    last_failure = Some(err.to_string());
                    continue;
                }
            };
            if !response.is_success() {
                last_failure = Some(format!("{} answered {}", path, response.status));
                continue;
            }

            // First success wins; later candidates are never consulted.
            let tokens: RefreshResponse = match response.json() {
                Ok(tokens) => tokens,
                Err(err) => {
                    last_failure = Some(format!("{} body unreadable: {}", path, err));
                    break;
                }
            };
            let Some(access_token) = tokens.access_token else {
                last_failure = Some(format!("{} body had no access token", path));
                break;
            };

            self.session
                .refresh_tokens(access_token.clone(), tokens.refresh_token)
                .await?;
            info!("Access token refreshed via {}", path);
            return Ok(access_token);
        }

        warn!(
            "Token refresh failed on every candidate endpoint: {}",
            last_failure.unwrap_or_else(|| "no candidates reachable".to_string())
        );
        self.clear_session_after_failed_refresh().await;
        Err(PortError::AuthExpired)
    }

    async fn clear_session_after_failed_refresh(&self) {
        if let Err(err) = self.session.clear_session().await {
            warn!("Could not clear the session after a failed refresh: {}", err);
        }
    }

    //-------------------------------------------------------------------------------------
    // Typed Endpoint Operations
    //-------------------------------------------------------------------------------------

    /// `POST /api/auth/student/login`. Unauthenticated and never routed
    /// through the refresh path. On success the session store holds the
    /// returned `{user, accessToken, refreshToken}` triple.
    pub async fn login(&self, student_phone: &str, password: &str) -> Result<Value, ClientError> {
        let body = serde_json::json!({
            "student_phone": student_phone,
            "password": password,
        });
        let request = HttpRequest {
            method: Method::Post,
            url: format!("{}/api/auth/student/login", self.base_url),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
            body: Some(body.to_string()),
        };
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = if response.body.trim().is_empty() {
                "Login failed".to_string()
            } else {
                response.body.clone()
            };
            return Err(ClientError::Http {
                status: response.status,
                message,
            });
        }

        let data: LoginResponse = response.json()?;
        self.session
            .set_session(data.user.clone(), data.access_token, data.refresh_token)
            .await?;
        Ok(data.user)
    }

    /// Clears the session. The server exposes no logout endpoint for
    /// students, so this is store-local.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.session.clear_session().await?;
        Ok(())
    }

    /// `GET /api/student-lms/dashboard`.
    pub async fn dashboard(&self) -> Result<DashboardData, ClientError> {
        let response = self.get("/api/student-lms/dashboard").await?;
        if !response.is_success() {
            return Err(http_error(&response, "Dashboard fetch failed"));
        }
        let envelope: ApiEnvelope<DashboardData> = response.json()?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET /api/introductions`. A missing or null `data` field is an empty
    /// list, not an error.
    pub async fn introductions(&self) -> Result<Vec<Introduction>, ClientError> {
        let response = self.get("/api/introductions").await?;
        if !response.is_success() {
            return Err(http_error(&response, "Introductions fetch failed"));
        }
        let envelope: ApiEnvelope<Vec<Introduction>> = response.json()?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET /api/student-lms/coins/history`, optionally filtered by kind.
    /// With no filter, no query string is appended.
    pub async fn coins_history(
        &self,
        kind: Option<TransactionKind>,
    ) -> Result<CoinsHistoryPage, ClientError> {
        let path = match kind {
            Some(kind) => format!(
                "/api/student-lms/coins/history?type={}",
                urlencoding::encode(kind.as_str())
            ),
            None => "/api/student-lms/coins/history".to_string(),
        };

        let response = self.get(&path).await?;
        if !response.is_success() {
            return Err(http_error(&response, "Failed to fetch coins history"));
        }

        let envelope: ApiEnvelope<CoinsHistoryPage> = response.json()?;
        if envelope.success == Some(false) {
            return Err(ClientError::Http {
                status: response.status,
                message: envelope
                    .message
                    .unwrap_or_else(|| "Failed to load data".to_string()),
            });
        }
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET /api/students`, normalized at the boundary.
    pub async fn students(&self) -> Result<Vec<Student>, ClientError> {
        let response = self.get("/api/students").await?;
        if !response.is_success() {
            return Err(http_error(&response, "Students fetch failed"));
        }
        let value: Value = response.json()?;
        Ok(decode::students(&value))
    }

    /// `GET /api/groups`, normalized at the boundary.
    pub async fn groups(&self) -> Result<Vec<Group>, ClientError> {
        let response = self.get("/api/groups").await?;
        if !response.is_success() {
            return Err(http_error(&response, "Groups fetch failed"));
        }
        let value: Value = response.json()?;
        Ok(decode::groups(&value))
    }

    /// `GET /api/student-lms/marks-attendance`, normalized at the boundary.
    pub async fn marks_attendance(&self) -> Result<Vec<StudentMarks>, ClientError> {
        let response = self.get("/api/student-lms/marks-attendance").await?;
        if !response.is_success() {
            return Err(http_error(&response, "Marks fetch failed"));
        }
        let value: Value = response.json()?;
        Ok(decode::marks(&value))
    }
}

/// Interprets a non-2xx body: the server's `message` field when present,
/// otherwise the caller's generic message.
fn http_error(response: &HttpResponse, fallback: &str) -> ClientError {
    let message = serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(String::from))
        .unwrap_or_else(|| fallback.to_string());
    ClientError::Http {
        status: response.status,
        message,
    }
}
