//! Shared test doubles: manual clock, canned validator, canned cookie
//! source, and an instant sleeper.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use leetcode_mcp::auth::{AuthError, ValidateCredentials};
use leetcode_mcp::browser::{BrowserCookies, BrowserLauncher, CookieSource};
use leetcode_mcp::util::{Clock, Sleeper};

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn starting_now() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc::now()),
        })
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(duration).unwrap();
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Validator returning a canned answer, switchable mid-test.
pub struct StaticValidator {
    username: Mutex<Option<String>>,
}

impl StaticValidator {
    pub fn accepting(username: &str) -> Arc<Self> {
        Arc::new(Self {
            username: Mutex::new(Some(username.to_string())),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        Arc::new(Self {
            username: Mutex::new(None),
        })
    }

    pub fn set(&self, username: Option<&str>) {
        *self.username.lock().unwrap() = username.map(String::from);
    }
}

#[async_trait]
impl ValidateCredentials for StaticValidator {
    async fn validate(&self, _csrf: &str, _session: &str) -> Option<String> {
        self.username.lock().unwrap().clone()
    }
}

/// Cookie source returning either canned cookies or an extraction failure.
pub struct StaticCookies {
    cookies: Option<BrowserCookies>,
}

impl StaticCookies {
    pub fn available(csrf: &str, session: &str) -> Arc<Self> {
        Arc::new(Self {
            cookies: Some(BrowserCookies {
                csrf_token: csrf.to_string(),
                session_token: session.to_string(),
                browser: "Chrome".to_string(),
            }),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self { cookies: None })
    }
}

impl CookieSource for StaticCookies {
    fn extract(&self) -> Result<BrowserCookies, AuthError> {
        self.cookies.clone().ok_or_else(|| {
            AuthError::CookieExtraction("no supported browser cookie store was found".into())
        })
    }
}

/// Launcher that records whether it was asked to open a URL.
pub struct RecordingLauncher {
    succeed: bool,
    pub opened: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            succeed: true,
            opened: Mutex::new(Vec::new()),
        })
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            succeed: false,
            opened: Mutex::new(Vec::new()),
        })
    }
}

impl BrowserLauncher for RecordingLauncher {
    fn open(&self, url: &str) -> Result<(), AuthError> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.succeed {
            Ok(())
        } else {
            Err(AuthError::BrowserLaunch("no display".into()))
        }
    }
}

/// Sleeper that returns immediately, so 30 polling iterations run instantly.
#[derive(Default)]
pub struct InstantSleeper;

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
