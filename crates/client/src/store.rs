//! Credential persistence.
//!
//! A blind string store: no validation, no decoding. The session owns the
//! credential's lifecycle; adapters only keep the bytes. Storage failures
//! are logged and swallowed, and callers must tolerate `get()` returning
//! nothing.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Persistence surface for the session's bearer credential.
pub trait CredentialStore: Send + Sync {
    fn put(&self, credential: &str);
    fn get(&self) -> Option<String>;
    fn clear(&self);
}

/// Process-local store; the credential dies with the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn put(&self, credential: &str) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(credential.to_owned());
    }

    fn get(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.clone()
    }

    fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

/// One credential string in a fixed file, durable across restarts.
///
/// The file analogue of profile-scoped browser storage: one session per
/// path, not shared across machines.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn put(&self, credential: &str) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(error = %err, path = %parent.display(), "could not create credential directory");
                return;
            }
        }
        if let Err(err) = std::fs::write(&self.path, credential) {
            tracing::warn!(error = %err, path = %self.path.display(), "could not persist credential");
        }
    }

    fn get(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let credential = contents.trim();
        if credential.is_empty() {
            None
        } else {
            Some(credential.to_owned())
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "could not clear credential");
            }
        }
    }
}
