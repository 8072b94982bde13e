//! Key-value storage backends the prompt store persists through.

mod file_store;
mod memory_store;

pub use file_store::FileStorage;
pub use memory_store::MemoryStorage;

use crate::error::{PromptKeepError, Result};

/// Key the prompt list is stored under unless configured otherwise.
pub const STORAGE_KEY: &str = "prompts_storage";

/// A string-keyed store of string blobs.
pub trait KeyValueStorage {
    /// Read the value at `key`; `Ok(None)` when nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value at `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Keys may only use `[A-Za-z0-9._-]` and may not start with a dot.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(PromptKeepError::InvalidStorageKey(key.to_string()))
    }
}
