//! File-backed adapter: one JSON document per key.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::{KvStore, StoreError};

const EXTENSION: &str = "json";

/// Persistent store keeping each key in `<dir>/<key>.json`.
///
/// Each write goes to its own uniquely named temporary file in `dir` which is
/// then renamed over the target. Readers see either the old or the new value,
/// even with several handles (or processes) writing the same key.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
    write_lock: Mutex<()>,
    closed: AtomicBool,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Open(format!("{}: {}", dir.display(), e)))?;
        tracing::debug!(dir = %dir.display(), "opened file store");
        Ok(Self {
            dir,
            quota: None,
            write_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
        })
    }

    /// Limit the total size of stored values.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    /// Directory holding the values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }

    fn used_bytes_except(&self, key: &str) -> Result<usize, StoreError> {
        let mut total = 0;
        for existing in self.keys()? {
            if existing == key {
                continue;
            }
            let len = fs::metadata(self.path_for(&existing)?)?.len();
            total += existing.len() + usize::try_from(len).unwrap_or(usize::MAX);
        }
        Ok(total)
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.ensure_open()?;
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.ensure_open()?;
        let path = self.path_for(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Backend("file store lock poisoned".to_string()))?;

        if let Some(quota) = self.quota {
            let required = self.used_bytes_except(key)? + key.len() + value.len();
            if required > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::from(e.error))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.ensure_open()?;
        let path = self.path_for(key)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Backend("file store lock poisoned".to_string()))?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.ensure_open()?;
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    fn close(&self) -> Result<(), StoreError> {
        self.closed.store(true, Ordering::SeqCst);
        tracing::debug!(dir = %self.dir.display(), "closed file store");
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("makeupProducts", b"[1,2]").unwrap();

        assert!(dir.path().join("makeupProducts.json").exists());

        // A second handle sees the same data
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("makeupProducts").unwrap(),
            Some(b"[1,2]".to_vec())
        );
        assert_eq!(reopened.keys().unwrap(), vec!["makeupProducts"]);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", b"1"),
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_quota_failure_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap().with_quota(20);
        store.set("a", b"small").unwrap();

        let err = store.set("a", &[b'x'; 64]).unwrap_err();
        assert!(err.is_quota());
        assert_eq!(store.get("a").unwrap(), Some(b"small".to_vec()));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_concurrent_handles_never_tear_values() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileStore::open(dir.path()).unwrap();
        let second = FileStore::open(dir.path()).unwrap();
        let reader = FileStore::open(dir.path()).unwrap();

        let a = vec![b'a'; 128 * 1024];
        let b = vec![b'b'; 128 * 1024];

        std::thread::scope(|scope| {
            let writer_a = scope.spawn(|| {
                for _ in 0..50 {
                    first.set("womenProducts", &a).unwrap();
                }
            });
            let writer_b = scope.spawn(|| {
                for _ in 0..50 {
                    second.set("womenProducts", &b).unwrap();
                }
            });

            while !(writer_a.is_finished() && writer_b.is_finished()) {
                if let Some(value) = reader.get("womenProducts").unwrap() {
                    assert!(value == a || value == b, "torn value of {} bytes", value.len());
                }
            }
        });

        let value = reader.get("womenProducts").unwrap().unwrap();
        assert!(value == a || value == b);
        assert_eq!(reader.keys().unwrap(), vec!["womenProducts"]);
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.delete("isAdmin").unwrap();
        assert!(!store.exists("isAdmin").unwrap());
    }

    #[test]
    fn test_closed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.close().unwrap();
        assert!(matches!(store.keys(), Err(StoreError::Closed)));
    }
}
