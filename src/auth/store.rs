use std::fs;
use std::path::{Path, PathBuf};

use super::credentials::Credentials;
use super::error::AuthError;

const CREDENTIALS_DIR: &str = ".leetcode-mcp";
const CREDENTIALS_FILE: &str = "credentials.json";

/// Storage abstraction for the persisted credential record.
///
/// Exactly one record exists at a time; `save` replaces it in full. A
/// missing record is a normal negative result (`Ok(None)` / `false`), never
/// an error. A record that exists but cannot be parsed is an error, since it
/// means the environment is misconfigured rather than logged out.
pub trait CredentialStore: Send + Sync {
    fn exists(&self) -> bool;
    fn load(&self) -> Result<Option<Credentials>, AuthError>;
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// File-backed credential store: one JSON file, owner-only permissions.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store rooted at an explicit directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: base_dir.into().join(CREDENTIALS_FILE),
        }
    }

    /// Store at the default per-user location, `~/.leetcode-mcp`.
    pub fn new_default() -> Self {
        Self::new(default_credentials_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        let credentials: Credentials =
            serde_json::from_str(&raw).map_err(|err| AuthError::MalformedFile {
                path: self.path.display().to_string(),
                message: err.to_string(),
            })?;
        Ok(Some(credentials))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::IncompleteRecord(
                "both csrftoken and LEETCODE_SESSION must be non-empty".into(),
            ));
        }
        Self::ensure_parent(&self.path)?;
        let serialized = serde_json::to_string_pretty(credentials)
            .map_err(|err| AuthError::Io(err.to_string()))?;
        fs::write(&self.path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AuthError::Io(err.to_string())),
        }
    }
}

fn default_credentials_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(CREDENTIALS_DIR))
        .unwrap_or_else(|| PathBuf::from(CREDENTIALS_DIR))
}
