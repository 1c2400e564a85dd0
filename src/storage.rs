use crate::models::{Resource, Session};
use crate::seed::{default_resources, default_sessions};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

pub const SESSIONS_KEY: &str = "archerySessions";
pub const RESOURCES_KEY: &str = "archeryResources";
pub const SPOTLIGHT_KEY: &str = "archerySpotlightId";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode data: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Flat key-value storage the application state is handed at startup.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    async fn remove(&self, key: &str) -> StoreResult<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Keeps every key in a single JSON object file, rewritten on each change.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &Map<String, Value>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let payload = serde_json::to_vec_pretty(entries)?;
        fs::write(&self.path, payload).await?;
        debug!(path = %self.path.display(), "data file written");
        Ok(())
    }

    async fn update(&self, apply: impl FnOnce(&mut Map<String, Value>)) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        let mut next = entries.clone();
        apply(&mut next);
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }
}

async fn load_entries(path: &Path) -> Map<String, Value> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(entries)) => entries,
            Ok(_) => {
                error!("data file is not a JSON object, starting empty");
                Map::new()
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                Map::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Map::new()
        }
    }
}

/// Typed access to the practice log kept in a [`KeyValueStore`].
///
/// Reads never fail: a missing, unreadable, or corrupt value is reported in
/// the log and read back as an empty collection.
#[derive(Clone)]
pub struct PracticeLog {
    store: Arc<dyn KeyValueStore>,
}

impl PracticeLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn read_sessions(&self) -> Vec<Session> {
        self.read_list(SESSIONS_KEY).await
    }

    pub async fn save_sessions(&self, sessions: &[Session]) -> StoreResult<()> {
        self.store
            .set(SESSIONS_KEY, serde_json::to_value(sessions)?)
            .await
    }

    pub async fn read_resources(&self) -> Vec<Resource> {
        self.read_list(RESOURCES_KEY).await
    }

    pub async fn save_resources(&self, resources: &[Resource]) -> StoreResult<()> {
        self.store
            .set(RESOURCES_KEY, serde_json::to_value(resources)?)
            .await
    }

    pub async fn spotlight_id(&self) -> Option<String> {
        match self.store.get(SPOTLIGHT_KEY).await {
            Ok(Some(Value::String(id))) if !id.is_empty() => Some(id),
            Ok(_) => None,
            Err(err) => {
                error!("could not read spotlight: {err}");
                None
            }
        }
    }

    pub async fn set_spotlight_id(&self, id: &str) -> StoreResult<()> {
        self.store
            .set(SPOTLIGHT_KEY, Value::String(id.to_string()))
            .await
    }

    pub async fn clear_spotlight(&self) -> StoreResult<()> {
        self.store.remove(SPOTLIGHT_KEY).await
    }

    /// Seeds sample sessions and resources for keys that were never written.
    pub async fn initialize_defaults(&self, today: NaiveDate, now_ms: i64) -> StoreResult<()> {
        if self.store.get(SESSIONS_KEY).await?.is_none() {
            info!("seeding sample practice sessions");
            self.save_sessions(&default_sessions(today)).await?;
        }
        if self.store.get(RESOURCES_KEY).await?.is_none() {
            info!("seeding sample learning resources");
            let resources = default_resources(now_ms);
            self.save_resources(&resources).await?;
            if let Some(first) = resources.first() {
                self.set_spotlight_id(&first.id).await?;
            }
        }
        Ok(())
    }

    async fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let items = match self.store.get(key).await {
            Ok(Some(Value::Array(items))) => items,
            Ok(Some(Value::Null) | None) => return Vec::new(),
            Ok(Some(_)) => {
                error!(key = %key, "stored value is not a list, reading as empty");
                return Vec::new();
            }
            Err(err) => {
                error!(key = %key, "could not read stored list: {err}");
                return Vec::new();
            }
        };

        items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warn!(key = %key, "skipping unreadable entry: {err}");
                    None
                }
            })
            .collect()
    }
}
