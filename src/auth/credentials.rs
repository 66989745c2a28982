use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Site;

/// The durable authentication record: the cookie pair LeetCode issues at
/// login plus when we captured it.
///
/// The serialized field names match the cookie names on the platform, so the
/// stored file reads the same as what the user copies out of DevTools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "csrftoken")]
    pub csrf_token: String,
    #[serde(rename = "LEETCODE_SESSION")]
    pub session_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Credentials {
    pub fn new(
        csrf_token: impl Into<String>,
        session_token: impl Into<String>,
        site: Option<Site>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            csrf_token: csrf_token.into(),
            session_token: session_token.into(),
            site,
            created_at,
        }
    }

    /// Whether both tokens are present. A record failing this check is never
    /// persisted.
    pub fn is_complete(&self) -> bool {
        !self.csrf_token.trim().is_empty() && !self.session_token.trim().is_empty()
    }

    /// Full days elapsed since the record was created.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }

    /// `Cookie` header value for authenticated platform requests.
    pub fn cookie_header(&self) -> String {
        format!(
            "csrftoken={}; LEETCODE_SESSION={}",
            self.csrf_token, self.session_token
        )
    }
}
