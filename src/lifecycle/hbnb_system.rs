use crate::config::{ApiConfig, StorageBackend};
use crate::storage::{FileStore, Storage, StorageError, Tables};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("failed to start storage: {0}")]
    Startup(#[from] StorageError),

    #[error("table actor failed: {0}")]
    ActorFailed(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator for the HBNB storage engine.
///
/// `HbnbSystem` is responsible for:
/// - **Loading**: reading the snapshot file into the tables when file storage is on
/// - **Lifecycle Management**: spawning one `ResourceActor` per entity type and
///   stopping them again
/// - **Sharing**: handing out [`Storage`] handles to the HTTP layer
///
/// # Example
///
/// ```ignore
/// let system = HbnbSystem::start(&ApiConfig::from_env()?).await?;
/// let app = api::router(system.storage());
/// // ... serve until shutdown, then drop `app` ...
/// system.shutdown().await?;
/// ```
pub struct HbnbSystem {
    storage: Storage,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl HbnbSystem {
    /// Starts the tables for `config`.
    ///
    /// With [`StorageBackend::File`] the snapshot at `config.file_path` is loaded first
    /// (a missing file means an empty store) and rewritten after every commit.
    pub async fn start(config: &ApiConfig) -> Result<Self, SystemError> {
        match config.storage {
            StorageBackend::Memory => Ok(Self::in_memory()),
            StorageBackend::File => {
                let store = FileStore::new(&config.file_path);
                let records = store.load().await?;
                let (tables, handles) = Tables::spawn(records);
                info!(path = %config.file_path.display(), "File storage ready");
                Ok(Self {
                    storage: Storage::new(tables).with_snapshot(store),
                    handles,
                })
            }
        }
    }

    /// Empty, memory-only tables. Used by tests and `HBNB_TYPE_STORAGE=memory`.
    pub fn in_memory() -> Self {
        let (tables, handles) = Tables::spawn(Vec::new());
        info!("Memory storage ready");
        Self {
            storage: Storage::new(tables),
            handles,
        }
    }

    /// A handle to the running tables. Clones share the same actors.
    pub fn storage(&self) -> Storage {
        self.storage.clone()
    }

    /// Gracefully shuts down the storage engine.
    ///
    /// Dropping the system's own handle closes the actors' channels once every other
    /// clone handed out by [`storage`](Self::storage) is gone too. Callers must drop
    /// those first (for the server: stop serving) or this waits forever.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down storage...");
        drop(self.storage);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Storage shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityKind, State};
    use std::path::PathBuf;

    fn file_config(path: PathBuf) -> ApiConfig {
        ApiConfig {
            file_path: path,
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_in_memory_start_and_shutdown() {
        let system = HbnbSystem::start(&ApiConfig {
            storage: StorageBackend::Memory,
            ..ApiConfig::default()
        })
        .await
        .unwrap();
        assert!(system.storage().snapshot().is_none());
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_storage_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(dir.path().join("file.json"));

        let system = HbnbSystem::start(&config).await.unwrap();
        {
            let mut session = system.storage().session();
            session.add(State::new("Texas"));
            session.save().await.unwrap();
        }
        system.shutdown().await.unwrap();

        let system = HbnbSystem::start(&config).await.unwrap();
        let storage = system.storage();
        assert_eq!(storage.count_kind(EntityKind::State).await.unwrap(), 1);
        drop(storage);
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = HbnbSystem::start(&file_config(path)).await;
        assert!(matches!(result, Err(SystemError::Startup(StorageError::Json(_)))));
    }
}
