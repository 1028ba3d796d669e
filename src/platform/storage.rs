// LogLens - platform/storage.rs
//
// Directory-backed upload store. Each upload is one flat file named after
// the sanitised client filename; a newer upload with the same name replaces
// the older one.

use crate::core::storage::{require_sanitized, UploadSource};
use crate::util::error::StorageError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Upload store rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsUploadStore {
    dir: PathBuf,
}

impl FsUploadStore {
    /// Open the store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::Io {
            path: dir.clone(),
            operation: "create upload directory",
            source: e,
        })?;
        tracing::debug!(dir = %dir.display(), "Upload store ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<(String, PathBuf), StorageError> {
        let name = require_sanitized(name)?;
        let path = self.dir.join(&name);
        Ok((name, path))
    }
}

impl UploadSource for FsUploadStore {
    fn save(&self, name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let (name, path) = self.path_for(name)?;

        // Each save gets its own temp file in the same directory, then is
        // renamed over the target. Readers see either the old or the new
        // upload, and concurrent saves of one name never share a temp path.
        let mut partial = NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::Io {
            path: self.dir.clone(),
            operation: "create upload temp file",
            source: e,
        })?;
        partial.write_all(bytes).map_err(|e| StorageError::Io {
            path: partial.path().to_path_buf(),
            operation: "write upload",
            source: e,
        })?;
        partial.persist(&path).map_err(|e| StorageError::Io {
            path: path.clone(),
            operation: "commit upload",
            source: e.error,
        })?;

        tracing::info!(name = %name, bytes = bytes.len(), "Upload stored");
        Ok(name)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let (name, path) = self.path_for(name)?;
        std::fs::read(&path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StorageError::NotFound { name }
            } else {
                StorageError::Io {
                    path,
                    operation: "read upload",
                    source: e,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("uploads");
        let store = FsUploadStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_save_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsUploadStore::open(tmp.path()).unwrap();

        let name = store.save("Game Session.log", b"LogTemp: hi\n").unwrap();

        assert_eq!(name, "Game_Session.log");
        assert!(tmp.path().join("Game_Session.log").is_file());
        let leftovers: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("Game_Session.log")]);
        assert_eq!(store.read("Game Session.log").unwrap(), b"LogTemp: hi\n");
    }

    #[test]
    fn test_concurrent_saves_of_same_name_all_succeed() {
        let tmp = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FsUploadStore::open(tmp.path()).unwrap());

        for round in 0..25u8 {
            let handles: Vec<_> = (0..4u8)
                .map(|worker| {
                    let store = std::sync::Arc::clone(&store);
                    std::thread::spawn(move || {
                        let body = vec![b'a' + worker; 64 * 1024];
                        store.save("game.log", &body)
                    })
                })
                .collect();

            for handle in handles {
                let result = handle.join().unwrap();
                assert!(result.is_ok(), "round {round}: {result:?}");
            }

            // Whichever save landed last, the file is one writer's complete body.
            let stored = store.read("game.log").unwrap();
            assert_eq!(stored.len(), 64 * 1024);
            assert!(stored.iter().all(|b| *b == stored[0]));
        }

        let files = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(files, 1, "temp files left behind");
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsUploadStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.read("never-uploaded.log"),
            Err(StorageError::NotFound { ref name }) if name == "never-uploaded.log"
        ));
    }

    #[test]
    fn test_traversal_names_stay_inside_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsUploadStore::open(tmp.path().join("uploads")).unwrap();

        let name = store.save("../escape.log", b"x").unwrap();

        assert_eq!(name, "escape.log");
        assert!(tmp.path().join("uploads").join("escape.log").is_file());
        assert!(!tmp.path().join("escape.log").exists());
    }

    #[test]
    fn test_invalid_name_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsUploadStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.save("../..", b"x"),
            Err(StorageError::InvalidName { .. })
        ));
    }
}
