//! Admin gate for mutating commands.
//!
//! A single hardcoded credential pair compared by exact string match, with a
//! marker file standing in for the session flag. This is an editorial gate
//! against accidental edits, not a security boundary.

use chrono::Utc;
use std::path::{Path, PathBuf};

const ADMIN_USERNAME: &str = "mirrabbihossain";
const ADMIN_PASSWORD: &str = "Rabbi@198027";

const SESSION_FILE: &str = "admin.session";

/// Checks the credential pair. Exact string comparison, nothing else.
pub fn verify_credentials(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

/// Admin session flag backed by a marker file in the data directory.
#[derive(Debug, Clone)]
pub struct AdminSession {
    path: PathBuf,
}

impl AdminSession {
    pub fn at(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    /// Verifies credentials and sets the session flag.
    pub fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if !verify_credentials(username, password) {
            return Err(AuthError::InvalidCredentials);
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(AuthError::Io)?;
        }
        std::fs::write(&self.path, Utc::now().to_rfc3339()).map_err(AuthError::Io)?;
        Ok(())
    }

    /// Clears the session flag. Logging out twice is fine.
    pub fn logout(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Io(e)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.path.exists()
    }

    /// Returns an error unless an admin session is active.
    pub fn require(&self) -> Result<(), AuthError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AuthError::NotLoggedIn)
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    InvalidCredentials,
    NotLoggedIn,
    Io(std::io::Error),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Wrong username or password"),
            AuthError::NotLoggedIn => {
                write!(f, "Admin session required. Run 'thanainfo login' first.")
            }
            AuthError::Io(e) => write!(f, "Session file error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Io(e) => Some(e),
            _ => None,
        }
    }
}
