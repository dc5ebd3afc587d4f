//! Persisted authentication session
//!
//! The seller's bearer token lives in a small JSON file under the user's
//! config directory, written by `notemarket auth login`. The file is
//! re-read on every request (it is tiny), which is what makes a token
//! refresh between flow steps take effect without restarting the flow.
//! The `NOTEMARKET_TOKEN` environment variable overrides the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use notemarket_core::ports::credentials::CredentialStore;

/// Environment variable that overrides the persisted token
const TOKEN_ENV_VAR: &str = "NOTEMARKET_TOKEN";

/// On-disk shape of the session file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedSession {
    token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

/// File-backed credential store
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Session store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Session store at the platform default path
    ///
    /// Typically `$XDG_CONFIG_HOME/notemarket/session.json` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("notemarket")
            .join("session.json")
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists a login session
    pub fn save(&self, token: &str, email: Option<&str>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let session = PersistedSession {
            token: Some(token.to_string()),
            email: email.map(str::to_string),
        };
        let json = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Deletes the persisted session, if any
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }

    /// Email recorded at login, if any
    pub fn email(&self) -> Option<String> {
        self.read().and_then(|session| session.email)
    }

    fn read(&self) -> Option<PersistedSession> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }
}

impl CredentialStore for SessionFile {
    /// Reads the freshest token available, per request
    fn access_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                return Some(token);
            }
        }
        self.read().and_then(|session| session.token)
    }
}
