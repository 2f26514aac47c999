//! services/dashboard/src/session.rs
//!
//! The process-wide session store. Views only read from it and dispatch
//! intents; every mutation goes through one of the methods below and is
//! persisted through the `SessionStorage` port before the lock is released.

use serde_json::Value;
use std::sync::Arc;
use student_lms_core::domain::Session;
use student_lms_core::ports::{PortResult, SessionStorage};
use tokio::sync::Mutex;
use tracing::warn;

//=========================================================================================
// The Session Store
//=========================================================================================

/// Holds the `{user, access_token, refresh_token}` triple behind a single
/// writer lock. The lock is what makes a concurrent refresh unable to
/// overwrite a newer token with a stale one: both tokens are replaced under
/// one acquisition.
pub struct SessionStore {
    inner: Mutex<Session>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Creates a store by restoring the persisted slice, if one exists.
    /// A missing or unreadable slice restores an empty session.
    pub async fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let session = match storage.load().await {
            Ok(Some(session)) => session,
            Ok(None) => Session::default(),
            Err(err) => {
                warn!("Could not restore persisted session: {}", err);
                Session::default()
            }
        };
        Self {
            inner: Mutex::new(session),
            storage,
        }
    }

    /// Replaces all three session fields atomically (login).
    pub async fn set_session(
        &self,
        user: Value,
        access_token: String,
        refresh_token: String,
    ) -> PortResult<()> {
        let mut session = self.inner.lock().await;
        session.user = Some(user);
        session.access_token = Some(access_token);
        session.refresh_token = Some(refresh_token);
        self.storage.save(&session).await
    }

    /// Clears all three session fields (logout or exhausted refresh).
    pub async fn clear_session(&self) -> PortResult<()> {
        let mut session = self.inner.lock().await;
        *session = Session::default();
        self.storage.save(&session).await
    }

    /// Replaces the access token; replaces the refresh token only when a new
    /// one was supplied, otherwise the prior value is retained.
    pub async fn refresh_tokens(
        &self,
        access_token: String,
        refresh_token: Option<String>,
    ) -> PortResult<()> {
        let mut session = self.inner.lock().await;
        session.access_token = Some(access_token);
        if let Some(refresh_token) = refresh_token {
            session.refresh_token = Some(refresh_token);
        }
        self.storage.save(&session).await
    }

    pub async fn access_token(&self) -> Option<String> {
        self.inner.lock().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.inner.lock().await.refresh_token.clone()
    }

    pub async fn user(&self) -> Option<Value> {
        self.inner.lock().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.lock().await.is_authenticated()
    }

    /// A snapshot of the whole slice, for diagnostics and tests.
    pub async fn snapshot(&self) -> Session {
        self.inner.lock().await.clone()
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::MemorySessionStorage;
    use serde_json::json;

    async fn store() -> (SessionStore, Arc<MemorySessionStorage>) {
        let storage = Arc::new(MemorySessionStorage::default());
        let store = SessionStore::restore(storage.clone()).await;
        (store, storage)
    }

    #[tokio::test]
    async fn login_sets_the_full_triple() {
        let (store, _) = store().await;
        store
            .set_session(json!({"name": "A"}), "a1".into(), "r1".into())
            .await
            .unwrap();

        let session = store.snapshot().await;
        assert_eq!(session.user, Some(json!({"name": "A"})));
        assert_eq!(session.access_token.as_deref(), Some("a1"));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert!(store.is_authenticated().await);
    }

    #[tokio::test]
    async fn refresh_without_new_token_keeps_the_old_refresh_token() {
        let (store, _) = store().await;
        store
            .set_session(json!({}), "a1".into(), "r1".into())
            .await
            .unwrap();

        store.refresh_tokens("a2".into(), None).await.unwrap();
        assert_eq!(store.access_token().await.as_deref(), Some("a2"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("r1"));

        store
            .refresh_tokens("a3".into(), Some("r2".into()))
            .await
            .unwrap();
        assert_eq!(store.access_token().await.as_deref(), Some("a3"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("r2"));
    }

    #[tokio::test]
    async fn clear_empties_every_field() {
        let (store, _) = store().await;
        store
            .set_session(json!({}), "a1".into(), "r1".into())
            .await
            .unwrap();
        store.clear_session().await.unwrap();

        let session = store.snapshot().await;
        assert_eq!(session, Session::default());
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn mutations_are_persisted_and_restored() {
        let (store, storage) = store().await;
        store
            .set_session(json!({"name": "A"}), "a1".into(), "r1".into())
            .await
            .unwrap();

        // A second store over the same storage sees the persisted slice.
        let restored = SessionStore::restore(storage).await;
        assert_eq!(restored.access_token().await.as_deref(), Some("a1"));
        assert_eq!(restored.refresh_token().await.as_deref(), Some("r1"));
    }
}
