//! HTTP client for the LeetCode GraphQL and submission endpoints.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::auth::Credentials;
use crate::error::{Result, ServerError};
use crate::models::{
    CheckResponse, DailyChallenge, DailyChallengeData, GraphqlEnvelope, MatchedUserData,
    Question, QuestionData, RecentSubmission, RecentSubmissionData, SubmitResponse, UserProfile,
};

const QUESTION_ID_QUERY: &str = r"
    query questionTitle($titleSlug: String!) {
        question(titleSlug: $titleSlug) {
            questionId
            questionFrontendId
        }
    }
";

const PROBLEM_QUERY: &str = r"
    query questionContent($titleSlug: String!) {
        question(titleSlug: $titleSlug) {
            questionId
            questionFrontendId
            title
            titleSlug
            difficulty
            content
            topicTags { name }
        }
    }
";

const DAILY_CHALLENGE_QUERY: &str = r"
    query questionOfToday {
        activeDailyCodingChallengeQuestion {
            date
            link
            question {
                questionFrontendId
                title
                titleSlug
                difficulty
                topicTags { name }
            }
        }
    }
";

const USER_PROFILE_QUERY: &str = r"
    query userPublicProfile($username: String!) {
        matchedUser(username: $username) {
            username
            profile {
                realName
                ranking
                reputation
            }
            submitStats {
                acSubmissionNum {
                    difficulty
                    count
                }
            }
        }
    }
";

const RECENT_SUBMISSIONS_QUERY: &str = r"
    query recentSubmissions($username: String!, $limit: Int!) {
        recentSubmissionList(username: $username, limit: $limit) {
            title
            titleSlug
            timestamp
            statusDisplay
            lang
        }
    }
";

/// Client for the platform API. Calls are synchronous request/response over
/// HTTPS with cookie-style auth headers when credentials are supplied.
#[derive(Debug, Clone)]
pub struct LeetCodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl LeetCodeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
        credentials: Option<&Credentials>,
    ) -> Result<T> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        let mut request = self
            .http
            .post(format!("{}/graphql", self.base_url))
            .json(&body);
        if let Some(creds) = credentials {
            request = request
                .header(reqwest::header::COOKIE, creds.cookie_header())
                .header("x-csrftoken", creds.csrf_token.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServerError::api(status.as_u16(), truncate(&message)));
        }

        let envelope: GraphqlEnvelope<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| ServerError::InvalidResponse("GraphQL response had no data".into()))
    }

    /// Resolve a problem slug to the platform's internal numeric question
    /// id. The submit endpoint only accepts the numeric form.
    pub async fn question_id(&self, slug: &str, credentials: &Credentials) -> Result<String> {
        let data: QuestionData = self
            .graphql(
                QUESTION_ID_QUERY,
                serde_json::json!({ "titleSlug": slug }),
                Some(credentials),
            )
            .await?;
        data.question
            .and_then(|q| q.question_id)
            .ok_or_else(|| ServerError::InvalidResponse(format!("unknown problem slug '{slug}'")))
    }

    /// Post a solution; returns the opaque submission id used for polling.
    pub async fn submit(
        &self,
        slug: &str,
        language: &str,
        question_id: &str,
        code: &str,
        credentials: &Credentials,
    ) -> Result<u64> {
        let url = format!("{}/problems/{slug}/submit/", self.base_url);
        let referer = format!("{}/problems/{slug}/", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::COOKIE, credentials.cookie_header())
            .header("x-csrftoken", credentials.csrf_token.clone())
            .header(reqwest::header::REFERER, referer)
            .json(&serde_json::json!({
                "lang": language,
                "question_id": question_id,
                "typed_code": code,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServerError::api(status.as_u16(), truncate(&message)));
        }
        let parsed: SubmitResponse = response.json().await?;
        Ok(parsed.submission_id)
    }

    /// One idempotent read of the judging state for a submission.
    pub async fn check_submission(
        &self,
        submission_id: u64,
        credentials: &Credentials,
    ) -> Result<CheckResponse> {
        let url = format!(
            "{}/submissions/detail/{submission_id}/check/",
            self.base_url
        );
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::COOKIE, credentials.cookie_header())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServerError::api(status.as_u16(), truncate(&message)));
        }
        Ok(response.json().await?)
    }

    pub async fn fetch_problem(&self, slug: &str) -> Result<Question> {
        let data: QuestionData = self
            .graphql(
                PROBLEM_QUERY,
                serde_json::json!({ "titleSlug": slug }),
                None,
            )
            .await?;
        data.question
            .ok_or_else(|| ServerError::InvalidResponse(format!("unknown problem slug '{slug}'")))
    }

    pub async fn fetch_daily_challenge(&self) -> Result<DailyChallenge> {
        let data: DailyChallengeData = self
            .graphql(DAILY_CHALLENGE_QUERY, serde_json::json!({}), None)
            .await?;
        data.active_daily_coding_challenge_question
            .ok_or_else(|| ServerError::InvalidResponse("no active daily challenge".into()))
    }

    pub async fn fetch_user_profile(&self, username: &str) -> Result<UserProfile> {
        let data: MatchedUserData = self
            .graphql(
                USER_PROFILE_QUERY,
                serde_json::json!({ "username": username }),
                None,
            )
            .await?;
        data.matched_user
            .ok_or_else(|| ServerError::InvalidResponse(format!("unknown user '{username}'")))
    }

    pub async fn fetch_recent_submissions(
        &self,
        username: &str,
        limit: u32,
    ) -> Result<Vec<RecentSubmission>> {
        let data: RecentSubmissionData = self
            .graphql(
                RECENT_SUBMISSIONS_QUERY,
                serde_json::json!({ "username": username, "limit": limit }),
                None,
            )
            .await?;
        Ok(data.recent_submission_list.unwrap_or_default())
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}
