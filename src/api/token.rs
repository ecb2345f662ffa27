//! Bearer token persistence
//!
//! The token lives in a single file in the config directory. A missing or
//! blank file means "not logged in".

use std::fs;
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Read the stored token, if any
    pub fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    pub fn save(&self, token: &str) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LedgerError::Io(format!("Failed to create config directory: {}", e)))?;
        }
        fs::write(&self.path, token.trim())
            .map_err(|e| LedgerError::Io(format!("Failed to write token file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600));
        }

        Ok(())
    }

    /// Forget the token. Clearing an absent token is not an error.
    pub fn clear(&self) -> LedgerResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LedgerError::Io(format!("Failed to remove token file: {}", e))),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.load().is_some()
    }
}
