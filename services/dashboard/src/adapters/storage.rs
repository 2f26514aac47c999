//! services/dashboard/src/adapters/storage.rs
//!
//! This module contains the session persistence adapter, the concrete
//! implementation of the `SessionStorage` port. It writes the session slice
//! to a single JSON file in the layout the hosting platform's key-value
//! storage used: a mapping keyed by slice name, where each value is itself a
//! JSON-encoded string.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use student_lms_core::domain::Session;
use student_lms_core::ports::{PortError, PortResult, SessionStorage};

/// The slice name inside the persisted root record.
const SLICE_KEY: &str = "auth";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that implements the `SessionStorage` port on top of a
/// local file.
#[derive(Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates a new `FileSessionStorage` over the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

//=========================================================================================
// `SessionStorage` Trait Implementation
//=========================================================================================

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> PortResult<Option<Session>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(PortError::Storage(err.to_string())),
        };

        let root: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|e| PortError::Storage(e.to_string()))?;
        let Some(slice) = root.get(SLICE_KEY) else {
            return Ok(None);
        };
        let session: Session =
            serde_json::from_str(slice).map_err(|e| PortError::Storage(e.to_string()))?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> PortResult<()> {
        let slice =
            serde_json::to_string(session).map_err(|e| PortError::Storage(e.to_string()))?;
        let mut root = BTreeMap::new();
        root.insert(SLICE_KEY.to_string(), slice);
        let raw =
            serde_json::to_string(&root).map_err(|e| PortError::Storage(e.to_string()))?;

        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        Session {
            user: Some(json!({"name": "A"})),
            access_token: Some("a1".to_string()),
            refresh_token: Some("r1".to_string()),
        }
    }

    #[tokio::test]
    async fn round_trips_the_persisted_slice() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("persist-root.json"));

        storage.save(&session()).await.unwrap();
        let restored = storage.load().await.unwrap();
        assert_eq!(restored, Some(session()));
    }

    #[tokio::test]
    async fn missing_file_loads_as_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("absent.json"));
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist-root.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let storage = FileSessionStorage::new(path);
        assert!(matches!(
            storage.load().await,
            Err(PortError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn uses_the_slice_keyed_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist-root.json");
        let storage = FileSessionStorage::new(path.clone());

        storage.save(&session()).await.unwrap();

        // Outer record is a map keyed by slice name; the value is a
        // JSON-encoded string, not a nested object.
        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let root: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        let slice: serde_json::Value = serde_json::from_str(&root["auth"]).unwrap();
        assert_eq!(slice["accessToken"], "a1");
    }
}
