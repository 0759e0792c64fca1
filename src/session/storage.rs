//! Expiring key/value storage backing the credential.
//!
//! Backends own expiry the way a browser cookie jar does: an entry whose
//! `expires_at` has passed is reported absent and pruned on the next read.

use std::{
    collections::BTreeMap,
    fmt::Debug,
    fs::{self, OpenOptions},
    io::{self, Write as _},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::session::Clock;

/// Failure of a credential storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("credential storage i/o error")]
    Io(#[from] io::Error),

    #[error("credential storage file is corrupt")]
    Corrupt(#[source] serde_json::Error),

    #[error("credential storage lock poisoned")]
    Poisoned,
}

/// Persistent, expiring credential storage.
pub trait CredentialStorage: Send + Sync + Debug {
    /// Read the live value for `key`, or `None` when missing or expired.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key` until `expires_at`, replacing any previous value.
    fn write(&self, key: &str, value: &str, expires_at: Timestamp) -> Result<(), StorageError>;

    /// Remove `key` immediately.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug)]
struct MemoryEntry {
    value: Zeroizing<String>,
    expires_at: Timestamp,
}

/// In-process storage; contents are lost when the process exits.
#[derive(Debug)]
pub struct MemoryStorage {
    clock: Arc<dyn Clock>,
    entries: RwLock<BTreeMap<String, MemoryEntry>>,
}

impl MemoryStorage {
    /// Empty storage expiring entries against `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: RwLock::new(BTreeMap::new()),
        }
    }
}

impl CredentialStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(|_poisoned| StorageError::Poisoned)?;

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.to_string())),
            Some(_) => {
                entries.remove(key);

                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &str, expires_at: Timestamp) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_poisoned| StorageError::Poisoned)?;

        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: Zeroizing::new(value.to_string()),
                expires_at,
            },
        );

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_poisoned| StorageError::Poisoned)?;

        entries.remove(key);

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JarEntry {
    value: String,
    expires_at: Timestamp,
}

type Jar = BTreeMap<String, JarEntry>;

/// JSON "cookie jar" file so a login survives process restarts.
///
/// Format: `{ "<key>": { "value": "...", "expires_at": "<RFC 3339>" } }`.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl FileStorage {
    /// Storage persisted at `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Jar, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Jar::new()),
            Err(error) => return Err(error.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Jar::new());
        }

        serde_json::from_str(&raw).map_err(StorageError::Corrupt)
    }

    fn save(&self, jar: &Jar) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_vec_pretty(jar).map_err(StorageError::Corrupt)?;
        let tmp_path = self.path.with_extension("tmp");

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt as _;

            options.mode(0o600);
        }

        let mut file = options.open(&tmp_path)?;
        file.write_all(&contents)?;
        file.sync_all()?;

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

impl CredentialStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut jar = self.load()?;
        let now = self.clock.now();

        let Some(entry) = jar.get(key) else {
            return Ok(None);
        };

        if entry.expires_at > now {
            return Ok(Some(entry.value.clone()));
        }

        debug!(key, "pruning expired credential entry");

        jar.remove(key);

        if let Err(error) = self.save(&jar) {
            warn!("failed to prune expired credential entry: {error}");
        }

        Ok(None)
    }

    fn write(&self, key: &str, value: &str, expires_at: Timestamp) -> Result<(), StorageError> {
        let mut jar = self.load().unwrap_or_else(|error| {
            warn!("discarding unreadable credential file: {error}");

            Jar::new()
        });

        jar.insert(
            key.to_string(),
            JarEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        self.save(&jar)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut jar = match self.load() {
            Ok(jar) => jar,
            Err(StorageError::Corrupt(error)) => {
                warn!("discarding unreadable credential file: {error}");

                return self.save(&Jar::new());
            }
            Err(error) => return Err(error),
        };

        if jar.remove(key).is_some() {
            self.save(&jar)?;
        }

        Ok(())
    }
}
