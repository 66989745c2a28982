//! Submission orchestration: credential guard, language mapping, question-id
//! resolution, submit, and the bounded result poll.

pub mod outcome;

pub use outcome::{FailedTest, SubmissionOutcome, SubmissionRequest};

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{CredentialStore, Credentials};
use crate::client::LeetCodeClient;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::util::Sleeper;

/// Fixed mapping from caller language tags to the platform's identifiers.
const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("java", "java"),
    ("python", "python3"),
    ("python3", "python3"),
    ("cpp", "cpp"),
    ("c++", "cpp"),
    ("c", "c"),
    ("csharp", "csharp"),
    ("c#", "csharp"),
    ("javascript", "javascript"),
    ("js", "javascript"),
    ("typescript", "typescript"),
    ("ts", "typescript"),
    ("rust", "rust"),
    ("go", "golang"),
    ("golang", "golang"),
    ("kotlin", "kotlin"),
    ("swift", "swift"),
    ("ruby", "ruby"),
];

/// Map a caller language tag to the platform identifier, if supported.
pub fn platform_language(tag: &str) -> Option<&'static str> {
    let lowered = tag.trim().to_ascii_lowercase();
    LANGUAGE_MAP
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, id)| *id)
}

/// Drives one submission attempt from credentials through polling.
///
/// Every failure mode is folded into a [`SubmissionOutcome`]; `submit` never
/// returns an error to the caller.
pub struct SubmissionOrchestrator {
    store: Arc<dyn CredentialStore>,
    client: LeetCodeClient,
    sleeper: Arc<dyn Sleeper>,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl SubmissionOrchestrator {
    pub fn new(
        config: &ServerConfig,
        store: Arc<dyn CredentialStore>,
        client: LeetCodeClient,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            store,
            client,
            sleeper,
            poll_interval: config.poll_interval,
            max_poll_attempts: config.max_poll_attempts,
        }
    }

    pub async fn submit(&self, request: &SubmissionRequest) -> SubmissionOutcome {
        // Both guards run before any network call.
        let credentials = match self.store.load() {
            Ok(Some(credentials)) => credentials,
            Ok(None) => return SubmissionOutcome::authorization_required(),
            Err(err) => {
                return SubmissionOutcome::Error {
                    message: err.to_string(),
                }
            }
        };
        let Some(language) = platform_language(&request.language) else {
            return SubmissionOutcome::unsupported_language(&request.language);
        };

        match self.run(request, language, &credentials).await {
            Ok(outcome) => outcome,
            Err(err) if err.is_unauthorized() => SubmissionOutcome::unauthorized(),
            Err(err) => SubmissionOutcome::Error {
                message: err.to_string(),
            },
        }
    }

    async fn run(
        &self,
        request: &SubmissionRequest,
        language: &str,
        credentials: &Credentials,
    ) -> Result<SubmissionOutcome> {
        let question_id = self
            .client
            .question_id(&request.problem_slug, credentials)
            .await?;
        tracing::debug!(slug = %request.problem_slug, question_id = %question_id, "resolved question id");

        let submission_id = self
            .client
            .submit(
                &request.problem_slug,
                language,
                &question_id,
                &request.code,
                credentials,
            )
            .await?;
        tracing::info!(submission_id, slug = %request.problem_slug, "submission posted, polling");

        for attempt in 1..=self.max_poll_attempts {
            self.sleeper.sleep(self.poll_interval).await;
            let check = self.client.check_submission(submission_id, credentials).await?;
            if check.is_terminal() {
                tracing::debug!(attempt, status = %check.status_msg, "judging finished");
                return Ok(SubmissionOutcome::from_terminal_check(&check));
            }
        }

        Ok(SubmissionOutcome::timeout(self.max_poll_attempts))
    }
}
