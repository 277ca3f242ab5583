//! JSON file storage.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use ingeniia_core::KeyValueStore;
use ingeniia_core::error::StorageError;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

type Entries = BTreeMap<String, String>;

/// A [`KeyValueStore`] persisted as a single JSON object on disk.
///
/// Every write takes an exclusive lock on a sidecar `.lock` file, reads
/// the current document, applies the change and renames a freshly written
/// temp file over the original. Readers never observe a half-written
/// document. On Unix the file is created with mode `0600`.
///
/// A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by the given file. The file and its parent
    /// directory are created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Entries::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries)?;

        let temp_path = self.path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        let written = create_private(&temp_path).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Run a read-modify-write cycle under the exclusive lock.
    fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let lock_file: File = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        lock_file.lock_exclusive()?;

        let result = self.read_entries().and_then(|mut entries| {
            apply(&mut entries);
            self.write_entries(&entries)
        });

        lock_file.unlock()?;
        result
    }
}

/// Create a new file readable only by its owner on Unix.
fn create_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    options.open(path)
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.read_entries()?;
        trace!(found = entries.contains_key(key), "Read key");
        Ok(entries.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })?;
        debug!("Stored key");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })?;
        debug!("Removed key");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %self.path.display(), entries = batch.len()))]
    fn write_batch(&self, batch: &[(&str, Option<&str>)]) -> Result<(), StorageError> {
        self.update(|entries| {
            for (key, value) in batch {
                match value {
                    Some(value) => entries.insert(key.to_string(), value.to_string()),
                    None => entries.remove(*key),
                };
            }
        })?;
        debug!("Committed batch");
        Ok(())
    }
}
