//! services/dashboard/src/guard.rs
//!
//! The route guard: a pure predicate over the session store. Protected
//! views are reachable only while an access token is present.

use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Main,
}

/// Evaluates the guard at navigation time.
pub async fn resolve(session: &SessionStore) -> Route {
    if session.is_authenticated().await {
        Route::Main
    } else {
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fake::MemorySessionStorage;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn guard_follows_the_session() {
        let store = SessionStore::restore(Arc::new(MemorySessionStorage::default())).await;
        assert_eq!(resolve(&store).await, Route::Login);

        store
            .set_session(json!({}), "a1".into(), "r1".into())
            .await
            .unwrap();
        assert_eq!(resolve(&store).await, Route::Main);

        store.clear_session().await.unwrap();
        assert_eq!(resolve(&store).await, Route::Login);
    }
}
