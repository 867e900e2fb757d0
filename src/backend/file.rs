//! Directory-backed store: one file per held lock.
//!
//! `add_if_absent` uses **create_new** semantics (exclusive create), which the
//! OS guarantees to succeed for exactly one caller. This works across
//! processes on one host, and across hosts on a shared filesystem with
//! reliable exclusive-create semantics.
//!
//! Lock names are arbitrary strings, so each name is encoded into a file
//! name: bytes outside `[A-Za-z0-9._-]` (and a leading `.`) become `%XX`.

use super::Backend;
use crate::error::{KvLockError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File extension for lock files.
const LOCK_EXTENSION: &str = "lock";

/// A lock file found in the backend directory.
#[derive(Debug, Clone)]
pub struct StoredLock {
    /// Decoded lock name.
    pub name: String,

    /// Path to the lock file.
    pub path: PathBuf,

    /// Raw payload written by the holder.
    pub payload: Vec<u8>,
}

/// Backend storing each lock as a file in a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`.
    ///
    /// The directory is created lazily on the first acquisition.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding lock files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the lock file for `name`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", encode_name(name), LOCK_EXTENSION))
    }

    /// List every lock file in the directory, sorted by name.
    ///
    /// Files without the `.lock` extension or with undecodable names are
    /// skipped. A missing directory yields an empty list.
    pub fn list(&self) -> Result<Vec<StoredLock>> {
        let mut locks = Vec::new();

        if !self.dir.exists() {
            return Ok(locks);
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| {
            KvLockError::BackendError(format!(
                "failed to read lock directory '{}': {}",
                self.dir.display(),
                e
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                KvLockError::BackendError(format!("failed to read lock directory entry: {}", e))
            })?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(LOCK_EXTENSION) {
                continue;
            }

            let Some(name) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_name)
            else {
                continue;
            };

            // Released between read_dir and now.
            let payload = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(KvLockError::BackendError(format!(
                        "failed to read lock file '{}': {}",
                        path.display(),
                        e
                    )));
                }
            };

            locks.push(StoredLock {
                name,
                path,
                payload,
            });
        }

        locks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(locks)
    }

    /// Create the lock directory if needed and check that it is a directory.
    pub fn ensure_dir(&self) -> Result<()> {
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(KvLockError::BackendError(format!(
                "lock directory '{}' is not a directory",
                self.dir.display()
            )));
        }
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                KvLockError::BackendError(format!(
                    "failed to create lock directory '{}': {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

impl Backend for FileBackend {
    fn add_if_absent(&self, key: &str, value: &[u8]) -> Result<bool> {
        self.ensure_dir()?;
        let path = self.path_for(key);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => {
                return Err(KvLockError::BackendError(format!(
                    "failed to create lock file '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        // The file exists from here on; a failed write must not leave it behind.
        file.write_all(value).map_err(|e| {
            let _ = fs::remove_file(&path);
            KvLockError::BackendError(format!("failed to write lock record: {}", e))
        })?;

        file.sync_all().map_err(|e| {
            let _ = fs::remove_file(&path);
            KvLockError::BackendError(format!("failed to sync lock file: {}", e))
        })?;

        Ok(true)
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(KvLockError::BackendError(format!(
                "failed to remove lock file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvLockError::BackendError(format!(
                "failed to read lock file '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Encode a lock name into a file-name-safe string.
pub fn encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for (i, byte) in name.bytes().enumerate() {
        let safe = byte.is_ascii_alphanumeric()
            || byte == b'_'
            || byte == b'-'
            || (byte == b'.' && i > 0);
        if safe {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

/// Decode a file stem produced by [`encode_name`].
///
/// Returns `None` for malformed escapes or non-UTF-8 results.
pub fn decode_name(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).ok()
}
