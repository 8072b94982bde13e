use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{validate_key, KeyValueStorage};
use crate::error::Result;

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written blob.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "storage item written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptKeepError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_none() {
        let tmp = TempDir::new().unwrap();
        let storage = FileStorage::new(tmp.path());
        assert!(storage.get_item("prompts_storage").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_directory_and_reads_back() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested/data");
        let mut storage = FileStorage::new(&dir);

        storage.set_item("prompts_storage", "[]").unwrap();

        assert!(dir.join("prompts_storage.json").exists());
        assert!(!dir.join("prompts_storage.json.tmp").exists());
        assert_eq!(
            storage.get_item("prompts_storage").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_set_overwrites() {
        let tmp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(tmp.path());

        storage.set_item("k", "first").unwrap();
        storage.set_item("k", "second").unwrap();

        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_rejects_path_escaping_key() {
        let tmp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(tmp.path());

        let result = storage.set_item("../outside", "v");
        assert!(matches!(result, Err(PromptKeepError::InvalidStorageKey(_))));
    }
}
