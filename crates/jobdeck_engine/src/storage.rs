use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::key_filename;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("data directory unusable: {0}")]
    DataDir(String),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage. Both operations may fail.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One file per key under a directory, created on first write.
///
/// A value is written to a synced temp file next to its target and renamed
/// over it, so readers see the old value or the new one, never a torn blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key_filename(key))
    }

    fn replace_file(dir: &Path, target: &Path, value: &str) -> Result<(), StorageError> {
        prepare_dir(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(target).map_err(|err| StorageError::Io(err.error))?;
        Ok(())
    }
}

fn prepare_dir(dir: &Path) -> Result<(), StorageError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(StorageError::DataDir(format!(
            "{} is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(fs::create_dir_all(dir)?),
        Err(err) => Err(StorageError::DataDir(format!("{}: {err}", dir.display()))),
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        tokio::task::spawn_blocking(move || match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        })
        .await
        .map_err(|err| StorageError::Unavailable(err.to_string()))?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.dir.clone();
        let target = self.path_for(key);
        let value = value.to_string();
        tokio::task::spawn_blocking(move || Self::replace_file(&dir, &target, &value))
            .await
            .map_err(|err| StorageError::Unavailable(err.to_string()))?
    }
}

/// Volatile store, also used to simulate failing storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.insert(key, value);
        store
    }

    /// Writes directly, bypassing the failure switches.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    /// Reads directly, bypassing the failure switches.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated read failure".into()));
        }
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated write failure".into()));
        }
        self.insert(key, value);
        Ok(())
    }
}
