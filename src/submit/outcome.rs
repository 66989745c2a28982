use serde::Serialize;

use crate::models::CheckResponse;

/// A submission as requested by the caller.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub problem_slug: String,
    pub code: String,
    pub language: String,
}

/// The mismatched test case reported with a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedTest {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

/// Terminal outcome of one submission attempt. Exactly one kind per result;
/// expected negatives (rejections, timeouts, missing credentials) are values
/// here, never errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Accepted {
        runtime: String,
        memory: String,
    },
    /// The judge finished and rejected the solution (wrong answer, limit
    /// exceeded, and similar).
    Rejected {
        status_message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        failed_test: Option<FailedTest>,
        #[serde(skip_serializing_if = "Option::is_none")]
        std_output: Option<String>,
    },
    /// The solution did not run to a verdict: compile or runtime error.
    JudgeError {
        status_message: String,
        diagnostic: String,
    },
    /// No stored credentials; no network call was made.
    AuthorizationRequired {
        message: String,
    },
    /// The language tag has no platform mapping; no network call was made.
    UnsupportedLanguage {
        language: String,
        message: String,
    },
    /// The platform rejected the session (401-equivalent). Distinct from a
    /// generic transport failure: re-authorization fixes it.
    Unauthorized {
        message: String,
    },
    /// The judge produced no terminal state within the polling budget.
    Timeout {
        message: String,
    },
    /// Transport or unexpected failure, carried as a value.
    Error {
        message: String,
    },
}

impl SubmissionOutcome {
    pub fn authorization_required() -> Self {
        Self::AuthorizationRequired {
            message: "Not authorized. Run start_leetcode_auth or save_leetcode_credentials \
                      first."
                .into(),
        }
    }

    pub fn unsupported_language(language: &str) -> Self {
        Self::UnsupportedLanguage {
            language: language.to_string(),
            message: format!("Unsupported language: {language}"),
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: "Session expired or rejected by LeetCode. Please re-authorize.".into(),
        }
    }

    pub fn timeout(attempts: u32) -> Self {
        Self::Timeout {
            message: format!("Submission check timed out after {attempts} attempts."),
        }
    }

    /// Classify a terminal judging response.
    pub fn from_terminal_check(check: &CheckResponse) -> Self {
        if check.status_msg == "Accepted" {
            return Self::Accepted {
                runtime: check.runtime.clone().unwrap_or_default(),
                memory: check.memory.clone().unwrap_or_default(),
            };
        }

        if let Some(diagnostic) = check
            .full_compile_error
            .clone()
            .or_else(|| check.full_runtime_error.clone())
        {
            return Self::JudgeError {
                status_message: check.status_msg.clone(),
                diagnostic,
            };
        }

        let failed_test = check.input.clone().map(|input| FailedTest {
            input,
            expected: check.expected_answer.as_ref().map(|v| v.join("\n")),
            actual: check.code_answer.as_ref().map(|v| v.join("\n")),
        });

        Self::Rejected {
            status_message: check.status_msg.clone(),
            failed_test,
            std_output: check.std_output.clone().filter(|out| !out.is_empty()),
        }
    }
}
