//! Server configuration
//!
//! Read once at startup from the environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HBNB_API_HOST` | `0.0.0.0` |
//! | `HBNB_API_PORT` | `5000` |
//! | `HBNB_TYPE_STORAGE` | `file` (or `memory`) |
//! | `HBNB_FILE_PATH` | `file.json` |

use std::path::PathBuf;
use thiserror::Error;

pub const HOST_VAR: &str = "HBNB_API_HOST";
pub const PORT_VAR: &str = "HBNB_API_PORT";
pub const STORAGE_VAR: &str = "HBNB_TYPE_STORAGE";
pub const FILE_PATH_VAR: &str = "HBNB_FILE_PATH";

/// Where entities live between restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// In memory, snapshotted to a JSON file after every commit.
    File,
    /// In memory only; lost on shutdown.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("HBNB_API_PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("HBNB_TYPE_STORAGE must be \"file\" or \"memory\", got {0:?}")]
    UnknownStorage(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub file_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            storage: StorageBackend::File,
            file_path: PathBuf::from("file.json"),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or empty keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = get(PORT_VAR) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Some(storage) = get(STORAGE_VAR) {
            config.storage = match storage.trim().to_ascii_lowercase().as_str() {
                "file" => StorageBackend::File,
                "memory" => StorageBackend::Memory,
                _ => return Err(ConfigError::UnknownStorage(storage)),
            };
        }
        if let Some(path) = get(FILE_PATH_VAR) {
            config.file_path = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
