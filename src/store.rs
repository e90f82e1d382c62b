//! Persistent key-value store
//!
//! The console keeps its session record here between invocations. Values are
//! opaque strings; callers decide how to serialize them.

use crate::config::ConfigManager;
use crate::error::{DeskError, DeskResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Abstract key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    async fn get(&self, key: &str) -> DeskResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> DeskResult<()>;

    /// Remove a value. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> DeskResult<()>;
}

/// File-backed store: one `<key>.json` file per key
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store in the default state directory
    pub async fn open() -> DeskResult<Self> {
        Self::open_at(ConfigManager::store_dir()).await
    }

    /// Open the store in a specific directory, creating it if needed
    pub async fn open_at(dir: PathBuf) -> DeskResult<Self> {
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| DeskError::io(format!("creating store directory {}", dir.display()), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(&dir, perms)
                .map_err(|e| DeskError::io("setting store dir permissions", e))?;
        }

        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> DeskResult<Option<String>> {
        let path = self.entry_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)
            .await
            .map_err(|e| DeskError::io(format!("reading store entry {}", path.display()), e))?;

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| DeskError::StoreEntryCorrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn set(&self, key: &str, value: &str) -> DeskResult<()> {
        let path = self.entry_path(key);
        let write_err =
            |e: std::io::Error| DeskError::io(format!("writing store entry {}", path.display()), e);

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&path).await.map_err(write_err)?;

        // The mode above only applies to newly created files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| DeskError::io("setting store entry permissions", e))?;
        }

        file.write_all(value.as_bytes()).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;

        debug!("Stored {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> DeskResult<()> {
        let path = self.entry_path(key);
        if path.exists() {
            fs::remove_file(&path).await.map_err(|e| {
                DeskError::io(format!("removing store entry {}", path.display()), e)
            })?;
            debug!("Removed {}", key);
        }
        Ok(())
    }
}

/// In-memory store, used when nothing should touch the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a value without going through the async trait
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DeskResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> DeskResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> DeskResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
