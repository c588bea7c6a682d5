//! File-backed persistent store.
//!
//! Each key is one file in the store directory. Writes go through a
//! temporary file, fsync and rename so a crash never leaves a half-written
//! value behind.

use devcon_core::error::{DevconError, Result};
use devcon_core::store::KeyValueStore;
use std::fs::{self, File};
use std::io::{ErrorKind, Write as IoWrite};
use std::path::{Path, PathBuf};

/// A directory of `<key>.json` files with a per-value size limit.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
    quota_bytes: usize,
}

impl FileKeyValueStore {
    /// Creates a store handle. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self {
            root: root.into(),
            quota_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{}.json.tmp", sanitize_key(key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<()> {
        if value.len() > self.quota_bytes {
            return Err(DevconError::StorageQuota {
                key: key.to_string(),
                bytes: value.len(),
                limit: self.quota_bytes,
            });
        }

        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }

        // Write to temporary file in the same directory
        let tmp_path = self.temp_path_for(key);
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(value)?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        // Atomic rename
        fs::rename(&tmp_path, self.path_for(key))?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Maps a key onto a safe file name: anything but `[A-Za-z0-9._-]` becomes `_`.
fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned.to_string()
    }
}
