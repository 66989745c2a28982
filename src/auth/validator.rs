use async_trait::async_trait;

use crate::models::{GraphqlEnvelope, UserStatus, UserStatusData};

/// GraphQL query confirming the session is accepted by the platform.
const USER_STATUS_QUERY: &str = r"
    query globalData {
        userStatus {
            username
            isSignedIn
        }
    }
";

/// Checks whether a credential pair is currently accepted by the platform.
///
/// Validation failures are always a value (`None`), never an error: callers
/// must be able to distinguish "could not authenticate" (common, expected)
/// from an internal bug. Transport failures fold into `None` as well.
#[async_trait]
pub trait ValidateCredentials: Send + Sync {
    /// Returns the associated username when the pair is valid.
    async fn validate(&self, csrf: &str, session: &str) -> Option<String>;
}

/// Validator backed by one minimal authenticated `globalData` query.
#[derive(Debug, Clone)]
pub struct GraphqlValidator {
    http: reqwest::Client,
    base_url: String,
}

impl GraphqlValidator {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn query_user_status(&self, csrf: &str, session: &str) -> Option<UserStatusData> {
        let body = serde_json::json!({ "query": USER_STATUS_QUERY });
        let response = self
            .http
            .post(format!("{}/graphql", self.base_url))
            .header(
                reqwest::header::COOKIE,
                format!("csrftoken={csrf}; LEETCODE_SESSION={session}"),
            )
            .header("x-csrftoken", csrf)
            .json(&body)
            .send()
            .await
            .ok()?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "credential validation rejected");
            return None;
        }

        let envelope: GraphqlEnvelope<UserStatusData> = response.json().await.ok()?;
        envelope.data
    }
}

#[async_trait]
impl ValidateCredentials for GraphqlValidator {
    async fn validate(&self, csrf: &str, session: &str) -> Option<String> {
        let status = self.query_user_status(csrf, session).await?.user_status?;
        match status {
            UserStatus {
                is_signed_in: true,
                username: Some(name),
            } if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}
