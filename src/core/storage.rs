// LogLens - core/storage.rs
//
// The upload-source capability handed to the analysis pipeline, plus an
// in-memory implementation. Filesystem-backed storage lives in
// platform::storage so this layer stays free of I/O.

use crate::util::error::StorageError;
use std::collections::HashMap;
use std::sync::RwLock;

/// Somewhere uploads are kept between the upload and filter requests.
pub trait UploadSource: Send + Sync {
    /// Store `bytes` under the sanitised form of `name`, replacing any
    /// previous upload with that name. Returns the name actually used.
    fn save(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Fetch a previously stored upload. `name` is sanitised the same way
    /// as on save, so callers may pass the original client-side filename.
    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;
}

/// Reduce a client-supplied filename to a safe, flat file name.
///
/// Non-ASCII characters are dropped, path separators become spaces,
/// whitespace runs collapse to `_`, anything outside `[A-Za-z0-9_.-]` is
/// removed and leading/trailing `.` and `_` are stripped. Returns `None`
/// if nothing is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let ascii: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(*c, '_' | '.' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Sanitise or report the name as invalid.
pub(crate) fn require_sanitized(name: &str) -> Result<String, StorageError> {
    sanitize_filename(name).ok_or_else(|| StorageError::InvalidName {
        name: name.to_string(),
    })
}

/// Upload store held entirely in memory. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryUploadSource {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryUploadSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored uploads.
    pub fn len(&self) -> Result<usize, StorageError> {
        let files = self.files.read().map_err(|_| StorageError::Poisoned)?;
        Ok(files.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }
}

impl UploadSource for MemoryUploadSource {
    fn save(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let name = require_sanitized(name)?;
        let mut files = self.files.write().map_err(|_| StorageError::Poisoned)?;
        files.insert(name.clone(), bytes.to_vec());
        Ok(name)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let name = require_sanitized(name)?;
        let files = self.files.read().map_err(|_| StorageError::Poisoned)?;
        files
            .get(&name)
            .cloned()
            .ok_or(StorageError::NotFound { name })
    }
}
