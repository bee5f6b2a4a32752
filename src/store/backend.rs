//! Key-value persistence backends.
//!
//! The record store only needs string values under string keys, the same
//! contract a browser's local storage offers.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{HrError, HrResult};

/// A synchronous string key-value store.
pub trait KeyValueBackend: Send {
    /// Reads the value under `key`, `None` when absent.
    fn get(&self, key: &str) -> HrResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> HrResult<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> HrResult<()>;
}

/// Backend that keeps every key in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> HrResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> HrResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> HrResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend storing each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Opens (creating if needed) the data directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> HrResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| HrError::Storage {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> HrResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HrError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> HrResult<()> {
        // Written beside the target, then renamed over it.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| HrError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    fn remove(&mut self, key: &str) -> HrResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(HrError::Storage {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_set_get_remove() {
        let mut backend = MemoryBackend::new();
        assert_eq!(backend.get("hr_theme").unwrap(), None);

        backend.set("hr_theme", "light").unwrap();
        assert_eq!(backend.get("hr_theme").unwrap().as_deref(), Some("light"));

        backend.remove("hr_theme").unwrap();
        backend.remove("hr_theme").unwrap();
        assert_eq!(backend.get("hr_theme").unwrap(), None);
    }

    #[test]
    fn test_file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = FileBackend::open(dir.path()).unwrap();
        first.set("hr_leaves", "[]").unwrap();

        let second = FileBackend::open(dir.path()).unwrap();
        assert_eq!(second.get("hr_leaves").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("hr_leaves.json").exists());
        assert!(!dir.path().join("hr_leaves.json.tmp").exists());
    }

    #[test]
    fn test_file_backend_missing_key_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::open(dir.path().join("nested")).unwrap();
        assert_eq!(backend.get("hr_employees").unwrap(), None);
        backend.remove("hr_employees").unwrap();
    }
}
