//! Server configuration (defaults layered under env vars and CLI flags).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// Which LeetCode site variant the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    #[default]
    Global,
    Cn,
}

impl Site {
    pub fn base_url(&self) -> &'static str {
        match self {
            Site::Global => "https://leetcode.com",
            Site::Cn => "https://leetcode.cn",
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/accounts/login/", self.base_url())
    }
}

impl FromStr for Site {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" | "com" | "leetcode.com" => Ok(Site::Global),
            "cn" | "china" | "leetcode.cn" => Ok(Site::Cn),
            other => Err(ServerError::Configuration(format!(
                "unknown site '{other}' (expected 'global' or 'cn')"
            ))),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Global => write!(f, "global"),
            Site::Cn => write!(f, "cn"),
        }
    }
}

/// Runtime configuration for the server.
///
/// The credential-lifetime numbers are product assumptions (LeetCode session
/// cookies typically live 7-14 days), so the warning threshold is a plain
/// configurable field rather than a hard invariant.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub site: Site,
    /// Override for the credential-store directory; `None` uses
    /// `~/.leetcode-mcp`.
    pub credentials_dir: Option<PathBuf>,
    /// How long a pending authorization session stays redeemable.
    pub auth_session_ttl: Duration,
    /// Delay between submission status checks.
    pub poll_interval: Duration,
    /// Maximum number of submission status checks before reporting a timeout.
    pub max_poll_attempts: u32,
    /// Credential age (in days) at which `check_auth_status` starts warning.
    pub warn_after_days: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            site: Site::Global,
            credentials_dir: None,
            auth_session_ttl: Duration::from_secs(5 * 60),
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: 30,
            warn_after_days: 5,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment (reading `.env` if present).
    ///
    /// Recognized variables: `LEETCODE_SITE` and
    /// `LEETCODE_MCP_CREDENTIALS_DIR`.
    pub fn from_env() -> Result<Self, ServerError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::default();

        if let Ok(site) = std::env::var("LEETCODE_SITE") {
            config.site = site.parse()?;
        }
        if let Ok(dir) = std::env::var("LEETCODE_MCP_CREDENTIALS_DIR") {
            if !dir.trim().is_empty() {
                config.credentials_dir = Some(PathBuf::from(dir));
            }
        }

        Ok(config)
    }
}
