use std::fmt;
use std::path::PathBuf;

use crate::auth::AuthError;

/// The two session cookies pulled from a local browser profile.
#[derive(Debug, Clone)]
pub struct BrowserCookies {
    pub csrf_token: String,
    pub session_token: String,
    /// Which browser the values came from, for user-facing messages.
    pub browser: String,
}

/// Source of the platform session cookies from an installed browser.
///
/// Raises when no supported browser is present or its profile cannot be
/// read; the authorization flow converts that into a structured failure with
/// remediation text.
pub trait CookieSource: Send + Sync {
    fn extract(&self) -> Result<BrowserCookies, AuthError>;
}

/// Browsers whose cookie databases we know how to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Edge,
    Brave,
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserKind::Chrome => write!(f, "Chrome"),
            BrowserKind::Edge => write!(f, "Edge"),
            BrowserKind::Brave => write!(f, "Brave"),
        }
    }
}

/// Candidate cookie-database locations for the default profile of each
/// supported browser, most common browser first.
pub fn cookie_database_candidates() -> Vec<(BrowserKind, PathBuf)> {
    let Some(base) = directories::BaseDirs::new() else {
        return Vec::new();
    };
    #[cfg(target_os = "macos")]
    {
        let support = base.home_dir().join("Library/Application Support");
        vec![
            (
                BrowserKind::Chrome,
                support.join("Google/Chrome/Default/Cookies"),
            ),
            (
                BrowserKind::Edge,
                support.join("Microsoft Edge/Default/Cookies"),
            ),
            (
                BrowserKind::Brave,
                support.join("BraveSoftware/Brave-Browser/Default/Cookies"),
            ),
        ]
    }

    #[cfg(target_os = "windows")]
    {
        let local = base.data_local_dir().to_path_buf();
        vec![
            (
                BrowserKind::Chrome,
                local.join("Google/Chrome/User Data/Default/Network/Cookies"),
            ),
            (
                BrowserKind::Edge,
                local.join("Microsoft/Edge/User Data/Default/Network/Cookies"),
            ),
            (
                BrowserKind::Brave,
                local.join("BraveSoftware/Brave-Browser/User Data/Default/Network/Cookies"),
            ),
        ]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        let config = base.home_dir().join(".config");
        vec![
            (
                BrowserKind::Chrome,
                config.join("google-chrome/Default/Cookies"),
            ),
            (
                BrowserKind::Edge,
                config.join("microsoft-edge/Default/Cookies"),
            ),
            (
                BrowserKind::Brave,
                config.join("BraveSoftware/Brave-Browser/Default/Cookies"),
            ),
        ]
    }
}

/// Locate the first supported browser with a cookie database on disk.
pub fn locate_cookie_database() -> Option<(BrowserKind, PathBuf)> {
    cookie_database_candidates()
        .into_iter()
        .find(|(_, path)| path.is_file())
}

/// Cookie source that inspects locally installed browsers.
///
/// Modern Chromium builds encrypt cookie values with an OS-keyring-bound
/// key, so this source stops at locating the database and reports why the
/// values could not be read. The manual-paste flow
/// (`save_leetcode_credentials`) remains the working path on such systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBrowserCookieSource;

impl CookieSource for LocalBrowserCookieSource {
    fn extract(&self) -> Result<BrowserCookies, AuthError> {
        match locate_cookie_database() {
            None => Err(AuthError::CookieExtraction(
                "no supported browser (Chrome, Edge, or Brave) cookie store was found".into(),
            )),
            Some((browser, path)) => Err(AuthError::CookieExtraction(format!(
                "found a {browser} cookie database at {}, but its values are \
                 encrypted by the browser and cannot be read directly",
                path.display()
            ))),
        }
    }
}
