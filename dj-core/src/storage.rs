//! Single-key persistent storage.
//!
//! The journal keeps its whole collection under one key. A store may refuse a
//! write that would exceed its size quota; that refusal is reported as
//! [`StorageError::QuotaExceeded`] so callers can tell "full" apart from a
//! broken disk.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Quota assumed when none is configured: 5 MB.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("write of {needed} bytes exceeds the {quota} byte quota")]
    QuotaExceeded { needed: usize, quota: usize },
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A key-value store holding string documents.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key` as a whole.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Largest value `set` accepts, in bytes as counted by
    /// [`approximate_bytes`]. `None` means unlimited.
    fn quota(&self) -> Option<usize>;

    /// Approximate footprint of the value under `key`, in bytes.
    fn approximate_size(&self, key: &str) -> usize {
        match self.get(key) {
            Ok(Some(value)) => approximate_bytes(&value),
            _ => 0,
        }
    }
}

/// Size estimate used for quota checks: two bytes per UTF-16 code unit,
/// which is how browsers account for stored strings.
pub fn approximate_bytes(value: &str) -> usize {
    value.encode_utf16().count() * 2
}

fn check_quota(quota: Option<usize>, value: &str) -> Result<(), StorageError> {
    if let Some(quota) = quota {
        let needed = approximate_bytes(value);
        if needed > quota {
            return Err(StorageError::QuotaExceeded { needed, quota });
        }
    }
    Ok(())
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go through a temp file in the same directory followed by a rename,
/// so a crash never leaves a half-written document behind.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, quota: Option<usize>) -> Self {
        Self {
            dir: dir.into(),
            quota,
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn atomic_write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(self.quota, value)?;
        let path = self.path_for(key);
        self.atomic_write(&path, value.as_bytes())
            .map_err(|source| StorageError::Io { path, source })
    }

    fn quota(&self) -> Option<usize> {
        self.quota
    }
}

/// In-process store, mostly for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(quota),
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(self.quota, value)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn quota(&self) -> Option<usize> {
        self.quota
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Ok,
    GettingFull,
    VeryFull,
}

impl UsageLevel {
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            UsageLevel::Ok => None,
            UsageLevel::GettingFull => Some("Getting full — photos may fail to save."),
            UsageLevel::VeryFull => Some("Very full — saving may fail. Delete photos/entries."),
        }
    }
}

/// How much of the quota the journal document occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageUsage {
    pub bytes: usize,
    pub quota_bytes: usize,
}

impl StorageUsage {
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / (1024.0 * 1024.0)
    }

    /// Share of the quota in use, clamped to `0..=100`.
    pub fn percent(&self) -> f64 {
        if self.quota_bytes == 0 {
            return 100.0;
        }
        (self.bytes as f64 / self.quota_bytes as f64 * 100.0).clamp(0.0, 100.0)
    }

    pub fn level(&self) -> UsageLevel {
        let pct = self.percent();
        if pct >= 95.0 {
            UsageLevel::VeryFull
        } else if pct >= 80.0 {
            UsageLevel::GettingFull
        } else {
            UsageLevel::Ok
        }
    }
}
