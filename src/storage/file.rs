// File storage implementation
// Author: Gabriel Demetrios Lafis

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{KeyValueStore, StorageError};

const EXTENSION: &str = "json";

/// Key/value store keeping one `<key>.json` file per key in a directory
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a new file storage, creating the directory if needed
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
        }

        Ok(FileStorage { base_dir })
    }

    /// Get the path for a key
    fn get_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let mut path = self.base_dir.clone();
        path.push(format!("{}.{}", key, EXTENSION));
        Ok(path)
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.get_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.get_path(key)?;
        debug!("Writing {}", path.display());
        fs::write(path, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.get_path(key)?;

        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        fs::remove_file(path)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if path.is_file() && path.extension().map_or(false, |ext| ext == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileStorage::new(dir.path()).unwrap();
        store.set("savedAuthAPIs", "[]").unwrap();

        let reopened = FileStorage::new(dir.path()).unwrap();
        assert_eq!(reopened.get("savedAuthAPIs").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.keys().unwrap(), vec!["savedAuthAPIs"]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path()).unwrap();

        assert!(matches!(store.set("../escape", "x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("absent").unwrap(), None);
        assert!(matches!(store.remove("absent"), Err(StorageError::NotFound(_))));
    }
}
