use std::path::PathBuf;

use crate::error::Result;
use crate::storage::{validate_key, FileStorage, STORAGE_KEY};

const APP_DIR: &str = "promptkeep";
const FALLBACK_DIR: &str = ".promptkeep";

/// Where prompts are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding one JSON file per storage key
    pub data_dir: PathBuf,
    /// Storage key the prompt list lives under
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults with optional overrides from the command line or environment.
    pub fn resolve(data_dir: Option<PathBuf>, storage_key: Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            data_dir: data_dir.unwrap_or(defaults.data_dir),
            storage_key: storage_key.unwrap_or(defaults.storage_key),
        };
        validate_key(&config.storage_key)?;
        Ok(config)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }
}

/// Platform data directory, or `./.promptkeep` when there is none.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}
