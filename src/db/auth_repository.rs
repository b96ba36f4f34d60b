// src/db/auth_repository.rs
// DOCUMENTATION: Persisted sign-in flag
// PURPOSE: The only state that survives a restart; presence means an active session

use crate::errors::TripsError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Marker-file store for the authentication flag
pub struct AuthRepository {
    path: PathBuf,
}

impl AuthRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a previous session left the flag behind
    pub fn is_set(&self) -> bool {
        self.path.exists()
    }

    /// Persist the flag
    pub fn set(&self) -> Result<(), TripsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, "true").map_err(|e| {
            log::error!("Failed to persist auth flag at {}: {}", self.path.display(), e);
            TripsError::StorageError(format!("Write auth flag failed: {}", e))
        })
    }

    /// Remove the flag (a missing flag is not an error)
    pub fn clear(&self) -> Result<(), TripsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                log::error!("Failed to clear auth flag at {}: {}", self.path.display(), e);
                Err(TripsError::StorageError(format!("Clear auth flag failed: {}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_set_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let repo = AuthRepository::new(dir.path().join("auth"));

        assert!(!repo.is_set());
        assert_ok!(repo.set());
        assert!(repo.is_set());
        assert_ok!(repo.clear());
        assert!(!repo.is_set());
    }

    #[test]
    fn test_clear_missing_flag() {
        let dir = tempfile::tempdir().unwrap();
        let repo = AuthRepository::new(dir.path().join("never-written"));
        assert_ok!(repo.clear());
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let repo = AuthRepository::new(dir.path().join("nested/state/auth"));
        assert_ok!(repo.set());
        assert!(repo.is_set());
    }

    #[test]
    fn test_set_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let repo = AuthRepository::new(blocker.join("auth"));
        assert_err!(repo.set());
    }
}
