use std::sync::Arc;

use serde::Serialize;

use crate::browser::{BrowserLauncher, CookieSource};
use crate::config::{ServerConfig, Site};
use crate::util::Clock;

use super::credentials::Credentials;
use super::error::AuthError;
use super::session::AuthSessionRegistry;
use super::store::CredentialStore;
use super::validator::ValidateCredentials;

/// Result of starting the browser authorization flow.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAuth {
    pub session_id: String,
    pub browser_opened: bool,
    pub login_url: String,
    pub instructions: Vec<String>,
    pub note: String,
}

/// Result of confirming the browser authorization flow.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfirmAuth {
    Authenticated {
        username: String,
        message: String,
    },
    /// The correlation session was never created or has passed its TTL.
    SessionExpired {
        message: String,
    },
    /// No supported browser, or its cookie store could not be read.
    CookiesUnavailable {
        message: String,
        remediation: String,
    },
    /// Cookies were extracted but the platform rejected them.
    InvalidCookies {
        message: String,
        remediation: String,
    },
}

/// Result of the manual-paste credential entry.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveCredentials {
    Authenticated { username: String, message: String },
    Invalid { message: String, hint: String },
}

/// Current authentication state, for `check_auth_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// Never had credentials (or they were cleared).
    NotAuthenticated,
    /// Credentials exist on disk but the platform no longer accepts them.
    Expired,
    Authenticated {
        username: String,
        age_days: i64,
        warning: Option<String>,
    },
}

/// Composition of the credential store, validator, session register, and
/// browser collaborators into the two supported authorization shapes.
///
/// Either entry point (the two-step cookie-scrape flow or the manual-paste
/// flow) converges on validate-then-persist; nothing is ever persisted
/// without passing validation first.
pub struct AuthFlow {
    store: Arc<dyn CredentialStore>,
    validator: Arc<dyn ValidateCredentials>,
    sessions: AuthSessionRegistry,
    cookies: Arc<dyn CookieSource>,
    launcher: Arc<dyn BrowserLauncher>,
    clock: Arc<dyn Clock>,
    site: Site,
    warn_after_days: i64,
}

impl AuthFlow {
    pub fn new(
        config: &ServerConfig,
        store: Arc<dyn CredentialStore>,
        validator: Arc<dyn ValidateCredentials>,
        cookies: Arc<dyn CookieSource>,
        launcher: Arc<dyn BrowserLauncher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            validator,
            sessions: AuthSessionRegistry::with_ttl(clock.clone(), config.auth_session_ttl),
            cookies,
            launcher,
            clock,
            site: config.site,
            warn_after_days: config.warn_after_days,
        }
    }

    /// Begin the two-step flow: register a session, try to open the login
    /// page, and hand back manual instructions for the fallback path.
    pub fn start(&self) -> StartAuth {
        let session_id = self.sessions.create();
        let login_url = self.site.login_url();
        let browser_opened = match self.launcher.open(&login_url) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "could not open default browser");
                false
            }
        };
        tracing::info!(session_id = %session_id, browser_opened, "authorization flow started");

        StartAuth {
            session_id,
            browser_opened,
            login_url: login_url.clone(),
            instructions: vec![
                format!("Log in to LeetCode at {login_url}"),
                "Open DevTools (F12, or Cmd+Option+I on Mac)".into(),
                format!(
                    "Go to: Application -> Cookies -> {}",
                    self.site.base_url()
                ),
                "Find the 'csrftoken' and 'LEETCODE_SESSION' cookies".into(),
                "Copy both full values and share them".into(),
            ],
            note: "If automatic cookie extraction fails, pass the copied values to \
                   save_leetcode_credentials instead."
                .into(),
        }
    }

    /// Complete the two-step flow. Persists credentials only when the
    /// session is still live and the extracted cookies validate.
    pub async fn confirm(&self, session_id: &str) -> Result<ConfirmAuth, AuthError> {
        if self.sessions.get(session_id).is_none() {
            return Ok(ConfirmAuth::SessionExpired {
                message: "Authorization session not found or expired (5-minute limit). \
                          Start again with start_leetcode_auth."
                    .into(),
            });
        }

        let cookies = match self.cookies.extract() {
            Ok(cookies) => cookies,
            Err(err) => {
                tracing::warn!(error = %err, "browser cookie extraction failed");
                return Ok(ConfirmAuth::CookiesUnavailable {
                    message: err.to_string(),
                    remediation: "Copy the 'csrftoken' and 'LEETCODE_SESSION' cookie values \
                                  from DevTools and call save_leetcode_credentials."
                        .into(),
                });
            }
        };

        let Some(username) = self
            .validator
            .validate(&cookies.csrf_token, &cookies.session_token)
            .await
        else {
            return Ok(ConfirmAuth::InvalidCookies {
                message: format!(
                    "Cookies extracted from {} were rejected by LeetCode.",
                    cookies.browser
                ),
                remediation: "Make sure you are logged in, then retry, or paste the cookie \
                              values manually via save_leetcode_credentials."
                    .into(),
            });
        };

        self.persist(&cookies.csrf_token, &cookies.session_token)?;
        self.sessions.clear(session_id);
        tracing::info!(username = %username, "authorization confirmed");

        Ok(ConfirmAuth::Authenticated {
            message: format!("Successfully authenticated as {username}."),
            username,
        })
    }

    /// Manual-paste shape: validate user-supplied cookie values and persist
    /// on success. Skips the session register and cookie extractor.
    pub async fn save_credentials(
        &self,
        csrf: &str,
        session: &str,
    ) -> Result<SaveCredentials, AuthError> {
        let Some(username) = self.validator.validate(csrf, session).await else {
            return Ok(SaveCredentials::Invalid {
                message: "Invalid credentials. Ensure you are logged into LeetCode and copied \
                          the correct cookie values."
                    .into(),
                hint: "Copy the entire value of both cookies, not just the visible portion."
                    .into(),
            });
        };

        self.persist(csrf, session)?;
        tracing::info!(username = %username, "credentials saved");

        Ok(SaveCredentials::Authenticated {
            message: format!(
                "Successfully authenticated as {username}! Credentials saved for future \
                 authenticated requests."
            ),
            username,
        })
    }

    /// Report the current credential state, distinguishing "never had
    /// credentials" from "had credentials that no longer validate".
    pub async fn status(&self) -> Result<AuthStatus, AuthError> {
        let Some(credentials) = self.store.load()? else {
            return Ok(AuthStatus::NotAuthenticated);
        };

        let Some(username) = self
            .validator
            .validate(&credentials.csrf_token, &credentials.session_token)
            .await
        else {
            return Ok(AuthStatus::Expired);
        };

        let age_days = credentials.age_days(self.clock.now());
        let warning = (age_days >= self.warn_after_days).then(|| {
            format!(
                "Credentials are {age_days} days old and may expire soon (typical lifetime: \
                 7-14 days). Re-authenticate if you hit authentication errors."
            )
        });

        Ok(AuthStatus::Authenticated {
            username,
            age_days,
            warning,
        })
    }

    /// Drop the stored credential record. Succeeds when none exists.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()
    }

    fn persist(&self, csrf: &str, session: &str) -> Result<(), AuthError> {
        let record = Credentials::new(csrf, session, Some(self.site), self.clock.now());
        self.store.save(&record)
    }
}
