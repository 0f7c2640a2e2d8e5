// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    Io,
    Serialization,
    Unavailable,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "io_error",
            Self::Serialization => "serialization_error",
            Self::Unavailable => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// The persistence collaborator: one addressable blob, whole-blob replace on
/// every write.
pub trait PersistenceBackend: Send + Sync {
    /// `Ok(None)` means the blob does not exist yet.
    fn read_blob(&self) -> Result<Option<String>, StoreError>;
    fn write_blob(&self, contents: &str) -> Result<(), StoreError>;
}

/// Blob stored as a single JSON file on local disk.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PersistenceBackend for JsonFileBackend {
    fn read_blob(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::new(
                StoreErrorCode::Io,
                format!("read {}: {err}", self.path.display()),
            )),
        }
    }

    fn write_blob(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    StoreError::new(
                        StoreErrorCode::Io,
                        format!("create {}: {err}", parent.display()),
                    )
                })?;
            }
        }
        fs::write(&self.path, contents).map_err(|err| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("write {}: {err}", self.path.display()),
            )
        })
    }
}

/// In-memory blob for tests; `fail_writes` simulates a full or read-only disk.
#[derive(Default)]
pub struct InMemoryBackend {
    pub blob: Mutex<Option<String>>,
    pub fail_writes: AtomicBool,
}

impl PersistenceBackend for InMemoryBackend {
    fn read_blob(&self) -> Result<Option<String>, StoreError> {
        self.blob
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::new(StoreErrorCode::Unavailable, "backend mutex poisoned"))
    }

    fn write_blob(&self, contents: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::new(StoreErrorCode::Io, "simulated write failure"));
        }
        let mut guard = self
            .blob
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Unavailable, "backend mutex poisoned"))?;
        *guard = Some(contents.to_string());
        Ok(())
    }
}
