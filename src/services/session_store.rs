// src/services/session_store.rs
use std::{
    collections::HashMap,
    fmt::{self, Debug},
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

/// Storage key the session snapshot lives under.
pub const SESSION_KEY: &str = "tvp_user";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberCategory {
    #[serde(alias = "guest")]
    Guest,
    #[serde(alias = "unregistered", alias = "type1")]
    Unregistered,
    #[serde(alias = "registered", alias = "type2")]
    Registered,
    #[serde(alias = "assistant", alias = "type3")]
    Assistant,
}

impl MemberCategory {
    /// Categories offered on the login tabs, in tab order.
    pub const MEMBERS: [MemberCategory; 3] = [
        MemberCategory::Unregistered,
        MemberCategory::Registered,
        MemberCategory::Assistant,
    ];

    pub fn tab_id(self) -> &'static str {
        match self {
            MemberCategory::Guest => "guest",
            MemberCategory::Unregistered => "type1",
            MemberCategory::Registered => "type2",
            MemberCategory::Assistant => "type3",
        }
    }

    pub fn from_tab_id(id: &str) -> Option<Self> {
        match id {
            "type1" => Some(MemberCategory::Unregistered),
            "type2" => Some(MemberCategory::Registered),
            "type3" => Some(MemberCategory::Assistant),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub category: MemberCategory,
    #[serde(default, rename = "subCategory", skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("display name must not be empty")]
    EmptyName,
    #[error("guest is not a login category")]
    GuestLogin,
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
    #[error("could not encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key/value storage for serialized snapshots.
pub trait SnapshotStorage: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key under `dir`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStorage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process storage, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        Ok(guard.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        guard.remove(key);
        Ok(())
    }
}

/// Holds at most one logged-in identity and mirrors it to durable storage.
#[derive(Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Identity>>>,
    storage: Arc<dyn SnapshotStorage>,
}

impl Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Rehydrate from the persisted snapshot. A missing or unreadable
    /// snapshot starts the store empty.
    pub fn open(storage: Arc<dyn SnapshotStorage>) -> Self {
        let restored = match storage.load(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    info!(id = %identity.id, category = ?identity.category, "restored session");
                    Some(identity)
                }
                Err(e) => {
                    warn!(error = %e, "discarding malformed session snapshot");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read session snapshot");
                None
            }
        };

        Self {
            current: Arc::new(RwLock::new(restored)),
            storage,
        }
    }

    /// Replace any current identity with a fresh one and persist it.
    pub async fn login(
        &self,
        category: MemberCategory,
        name: &str,
    ) -> Result<Identity, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if category == MemberCategory::Guest {
            return Err(SessionError::GuestLogin);
        }

        let identity = Identity {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category,
            sub_category: None,
        };

        let snapshot = serde_json::to_string(&identity)?;
        let mut guard = self.current.write().await;
        self.persist(move |storage| storage.save(SESSION_KEY, &snapshot)).await?;
        *guard = Some(identity.clone());

        info!(id = %identity.id, ?category, "login");
        Ok(identity)
    }

    /// Clear the identity and its snapshot. Returns whether one was present.
    pub async fn logout(&self) -> Result<bool, SessionError> {
        let mut guard = self.current.write().await;
        self.persist(|storage| storage.remove(SESSION_KEY)).await?;
        let had = guard.take().is_some();
        if had {
            info!("logout");
        }
        Ok(had)
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    // Storage backends do blocking file I/O; keep it off the async workers.
    async fn persist<F>(&self, op: F) -> Result<(), StorageError>
    where
        F: FnOnce(&dyn SnapshotStorage) -> Result<(), StorageError> + Send + 'static,
    {
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || op(storage.as_ref())).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (SessionStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (SessionStore::open(Arc::new(storage.clone())), storage)
    }

    #[tokio::test]
    async fn login_then_read_matches_category() {
        for category in MemberCategory::MEMBERS {
            let (store, _) = store();
            let identity = store.login(category, "Murugan").await.unwrap();
            let current = store.current_identity().await.unwrap();
            assert_eq!(current.category, category);
            assert_eq!(current, identity);
        }
    }

    #[tokio::test]
    async fn login_replaces_previous_identity() {
        let (store, _) = store();
        let first = store.login(MemberCategory::Registered, "Murugan").await.unwrap();
        let second = store.login(MemberCategory::Assistant, "Valli").await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.current_identity().await.unwrap().name, "Valli");
    }

    #[tokio::test]
    async fn blank_name_and_guest_are_rejected() {
        let (store, storage) = store();
        assert!(matches!(
            store.login(MemberCategory::Registered, "   ").await,
            Err(SessionError::EmptyName)
        ));
        assert!(matches!(
            store.login(MemberCategory::Guest, "Kumar").await,
            Err(SessionError::GuestLogin)
        ));
        assert!(store.current_identity().await.is_none());
        assert!(storage.load(SESSION_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (store, _) = store();
        assert!(!store.logout().await.unwrap());
        store.login(MemberCategory::Unregistered, "Kumar").await.unwrap();
        assert!(store.logout().await.unwrap());
        assert!(!store.logout().await.unwrap());
    }

    struct ReadOnlyStorage;

    impl SnapshotStorage for ReadOnlyStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failed_write_leaves_identity_untouched() {
        let store = SessionStore::open(Arc::new(ReadOnlyStorage));
        let err = store.login(MemberCategory::Registered, "Murugan").await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(StorageError::Io(_))));
        assert!(store.current_identity().await.is_none());
        assert!(matches!(store.logout().await, Err(SessionError::Storage(_))));
    }

    #[tokio::test]
    async fn malformed_snapshot_starts_empty() {
        let storage = MemoryStorage::new();
        storage.save(SESSION_KEY, "{not json").unwrap();
        let store = SessionStore::open(Arc::new(storage));
        assert!(store.current_identity().await.is_none());
    }

    #[test]
    fn snapshot_uses_original_field_names() {
        let identity = Identity {
            id: "1".into(),
            name: "Murugan".into(),
            category: MemberCategory::Registered,
            sub_category: None,
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["type"], "REGISTERED");
        assert!(json.get("subCategory").is_none());
    }

    #[test]
    fn category_accepts_tab_ids() {
        let parsed: MemberCategory = serde_json::from_str("\"type3\"").unwrap();
        assert_eq!(parsed, MemberCategory::Assistant);
        assert_eq!(MemberCategory::from_tab_id("type2"), Some(MemberCategory::Registered));
        assert_eq!(MemberCategory::Registered.tab_id(), "type2");
    }
}
