//! Durable storage for the bearer token: one key, file-backed, so the
//! credential outlives the process the way browser localStorage would.

use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Read the persisted token, if any. An absent file is "no token",
    /// not an error.
    pub fn load(&self) -> AppResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| AppError::storage(format!("read {}: {}", self.path.display(), e)))?;
        let token = raw.trim();
        if token.is_empty() {
            return Ok(None);
        }
        Ok(Some(token.to_string()))
    }

    pub fn save(&self, token: &str) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| AppError::storage(format!("mkdir {}: {}", dir.display(), e)))?;
        }
        std::fs::write(&self.path, token)
            .map_err(|e| AppError::storage(format!("write {}: {}", self.path.display(), e)))
    }

    /// Remove the persisted token. Idempotent.
    pub fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("remove {}: {}", self.path.display(), e))),
        }
    }
}
