//! Typed response models for the LeetCode GraphQL and submission APIs.

use serde::{Deserialize, Serialize};

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphqlEnvelope<T> {
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusData {
    pub user_status: Option<UserStatus>,
}

/// Signed-in state reported by the `globalData` query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatus {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_signed_in: bool,
}

#[derive(Debug, Deserialize)]
pub struct QuestionData {
    pub question: Option<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub question_id: Option<String>,
    #[serde(default)]
    pub question_frontend_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub topic_tags: Option<Vec<TopicTag>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicTag {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallengeData {
    pub active_daily_coding_challenge_question: Option<DailyChallenge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyChallenge {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    pub question: Question,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUserData {
    pub matched_user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub profile: Option<ProfileDetails>,
    #[serde(default)]
    pub submit_stats: Option<SubmitStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub ranking: Option<i64>,
    #[serde(default)]
    pub reputation: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitStats {
    #[serde(default)]
    pub ac_submission_num: Vec<SubmissionCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionCount {
    pub difficulty: String,
    pub count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmissionData {
    #[serde(default)]
    pub recent_submission_list: Option<Vec<RecentSubmission>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSubmission {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status_display: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Response from `POST /problems/{slug}/submit/`.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub submission_id: u64,
}

/// Response from `GET /submissions/detail/{id}/check/`.
///
/// `state` is the judging progress marker; everything else is only
/// meaningful once the state is terminal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub status_msg: String,
    pub runtime: Option<String>,
    pub memory: Option<String>,
    pub input: Option<String>,
    pub code_answer: Option<Vec<String>>,
    pub expected_answer: Option<Vec<String>>,
    pub std_output: Option<String>,
    pub full_compile_error: Option<String>,
    pub full_runtime_error: Option<String>,
}

impl CheckResponse {
    /// Whether the judge has finished evaluating the submission.
    pub fn is_terminal(&self) -> bool {
        self.state == "SUCCESS"
    }
}
