//! MCP surface: stateless tool, prompt, and resource adapters over the
//! authentication core and the platform client.

pub mod prompts;

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use serde::Deserialize;

use crate::auth::{AuthFlow, AuthStatus};
use crate::client::LeetCodeClient;
use crate::error::ServerError;
use crate::submit::{SubmissionOrchestrator, SubmissionRequest};

#[derive(Deserialize, schemars::JsonSchema)]
pub struct ConfirmAuthParams {
    #[schemars(description = "Session id returned by start_leetcode_auth")]
    pub session_id: String,
}

#[derive(Deserialize, schemars::JsonSchema)]
pub struct SaveCredentialsParams {
    #[schemars(description = "CSRF token from LeetCode cookies (csrftoken)")]
    pub csrftoken: String,
    #[schemars(description = "Session token from LeetCode cookies (LEETCODE_SESSION)")]
    pub session: String,
}

#[derive(Deserialize, schemars::JsonSchema)]
pub struct SubmitSolutionParams {
    #[schemars(description = "The problem slug (e.g. 'two-sum')")]
    pub problem_slug: String,
    #[schemars(description = "The solution code to submit")]
    pub code: String,
    #[schemars(
        description = "Programming language (java, python, cpp, javascript, typescript, rust, go, ...)"
    )]
    pub language: String,
}

#[derive(Deserialize, schemars::JsonSchema)]
pub struct GetProblemParams {
    #[schemars(description = "The problem slug (e.g. 'two-sum')")]
    pub slug: String,
}

#[derive(Deserialize, schemars::JsonSchema)]
pub struct UserParams {
    #[schemars(description = "LeetCode username")]
    pub username: String,
}

#[derive(Deserialize, schemars::JsonSchema)]
pub struct RecentSubmissionsParams {
    #[schemars(description = "LeetCode username")]
    pub username: String,
    #[schemars(description = "Maximum number of submissions to return (default 10)")]
    pub limit: Option<u32>,
}

/// The MCP server handler. Tools hold no state of their own; everything
/// durable lives in the credential store and the session register inside
/// [`AuthFlow`].
#[derive(Clone)]
pub struct LeetCodeServer {
    client: LeetCodeClient,
    flow: Arc<AuthFlow>,
    orchestrator: Arc<SubmissionOrchestrator>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LeetCodeServer {
    pub fn new(
        client: LeetCodeClient,
        flow: Arc<AuthFlow>,
        orchestrator: Arc<SubmissionOrchestrator>,
    ) -> Self {
        Self {
            client,
            flow,
            orchestrator,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Initiates the LeetCode authentication flow. Opens the browser to the \
                       LeetCode login page (best effort) and returns a session id plus \
                       instructions for manual credential extraction."
    )]
    async fn start_leetcode_auth(&self) -> Result<CallToolResult, ErrorData> {
        json_result(&self.flow.start())
    }

    #[tool(
        description = "Completes a previously started authentication flow by reading the \
                       LeetCode session cookies from the local browser, validating them, and \
                       storing them. Requires the session id from start_leetcode_auth."
    )]
    async fn confirm_leetcode_auth(
        &self,
        params: Parameters<ConfirmAuthParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let outcome = self
            .flow
            .confirm(&params.0.session_id)
            .await
            .map_err(internal)?;
        json_result(&outcome)
    }

    #[tool(
        description = "Validates and saves LeetCode credentials provided by the user. The \
                       values are checked against LeetCode before being stored locally."
    )]
    async fn save_leetcode_credentials(
        &self,
        params: Parameters<SaveCredentialsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let SaveCredentialsParams { csrftoken, session } = params.0;
        let outcome = self
            .flow
            .save_credentials(&csrftoken, &session)
            .await
            .map_err(internal)?;
        json_result(&outcome)
    }

    #[tool(
        description = "Checks whether LeetCode credentials exist and are still valid. Reports \
                       the username, credential age, and an expiry warning when they are \
                       getting old."
    )]
    async fn check_auth_status(&self) -> Result<CallToolResult, ErrorData> {
        let status = self.flow.status().await.map_err(internal)?;
        let payload = match status {
            AuthStatus::NotAuthenticated => serde_json::json!({
                "authenticated": false,
                "message": "No credentials found. Use start_leetcode_auth to authenticate.",
            }),
            AuthStatus::Expired => serde_json::json!({
                "authenticated": false,
                "expired": true,
                "message": "Credentials have expired. Authenticate again with \
                            start_leetcode_auth.",
            }),
            AuthStatus::Authenticated {
                username,
                age_days,
                warning,
            } => serde_json::json!({
                "authenticated": true,
                "username": username,
                "ageDays": age_days,
                "warning": warning,
                "message": format!("Authenticated as {username}. Credentials are valid."),
            }),
        };
        json_value_result(&payload)
    }

    #[tool(description = "Removes the stored LeetCode credentials from this machine.")]
    async fn logout_leetcode(&self) -> Result<CallToolResult, ErrorData> {
        self.flow.logout().map_err(internal)?;
        json_value_result(&serde_json::json!({
            "status": "logged_out",
            "message": "Stored credentials removed.",
        }))
    }

    #[tool(
        description = "Submit a solution to a LeetCode problem and wait for the judgement. \
                       Returns acceptance status with runtime/memory stats, failed test case \
                       details, or a structured error. Requires authentication."
    )]
    async fn submit_solution(
        &self,
        params: Parameters<SubmitSolutionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let SubmitSolutionParams {
            problem_slug,
            code,
            language,
        } = params.0;
        let outcome = self
            .orchestrator
            .submit(&SubmissionRequest {
                problem_slug,
                code,
                language,
            })
            .await;
        json_result(&outcome)
    }

    #[tool(description = "Get a LeetCode problem by its slug, including content and metadata.")]
    async fn get_problem(
        &self,
        params: Parameters<GetProblemParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.fetch_problem(&params.0.slug).await {
            Ok(question) => json_result(&question),
            Err(err) => platform_error(err),
        }
    }

    #[tool(description = "Get today's LeetCode daily challenge problem.")]
    async fn get_daily_challenge(&self) -> Result<CallToolResult, ErrorData> {
        match self.client.fetch_daily_challenge().await {
            Ok(daily) => json_result(&daily),
            Err(err) => platform_error(err),
        }
    }

    #[tool(
        description = "Retrieves profile information about a LeetCode user, including stats \
                       and solved-problem counts."
    )]
    async fn get_user_profile(
        &self,
        params: Parameters<UserParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.client.fetch_user_profile(&params.0.username).await {
            Ok(profile) => json_result(&profile),
            Err(err) => platform_error(err),
        }
    }

    #[tool(
        description = "Retrieves a user's recent submissions, including both accepted and \
                       failed attempts."
    )]
    async fn get_recent_submissions(
        &self,
        params: Parameters<RecentSubmissionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let RecentSubmissionsParams { username, limit } = params.0;
        match self
            .client
            .fetch_recent_submissions(&username, limit.unwrap_or(10))
            .await
        {
            Ok(submissions) => json_result(&submissions),
            Err(err) => platform_error(err),
        }
    }
}

#[tool_handler]
impl ServerHandler for LeetCodeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                prompts: Some(PromptsCapability::default()),
                resources: Some(ResourcesCapability::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "leetcode-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "LeetCode MCP server: browse problems and user stats, authenticate via \
                 browser-cookie extraction, and submit solutions for judging. \
                 Authenticated tools need start_leetcode_auth or save_leetcode_credentials \
                 first."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, ErrorData> {
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: prompts::all(),
            meta: Default::default(),
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, ErrorData> {
        prompts::get(&request.name).ok_or_else(|| {
            ErrorData::invalid_params(format!("unknown prompt '{}'", request.name), None)
        })
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        Ok(ListResourcesResult {
            next_cursor: None,
            resources: vec![RawResource::new(
                "leetcode://daily-challenge",
                "Today's LeetCode daily challenge",
            )
            .no_annotation()],
            meta: Default::default(),
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        let uri = request.uri.as_str();
        let payload = if uri == "leetcode://daily-challenge" {
            let daily = self
                .client
                .fetch_daily_challenge()
                .await
                .map_err(internal)?;
            serde_json::to_string_pretty(&daily).map_err(internal)?
        } else if let Some(slug) = uri.strip_prefix("leetcode://problems/") {
            let question = self
                .client
                .fetch_problem(slug)
                .await
                .map_err(internal)?;
            serde_json::to_string_pretty(&question).map_err(internal)?
        } else {
            return Err(ErrorData::resource_not_found(
                format!("unknown resource '{uri}'"),
                None,
            ));
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(payload, uri)],
        })
    }
}

/// Serialize a structured outcome as the tool's JSON text content.
fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value).map_err(internal)?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn json_value_result(value: &serde_json::Value) -> Result<CallToolResult, ErrorData> {
    json_result(value)
}

/// Platform fetch failures are domain errors the agent can react to, not
/// protocol errors.
fn platform_error(err: ServerError) -> Result<CallToolResult, ErrorData> {
    match err {
        ServerError::Api { .. } | ServerError::InvalidResponse(_) => Ok(CallToolResult::error(
            vec![Content::text(err.to_string())],
        )),
        other => Err(internal(other)),
    }
}

fn internal(err: impl std::fmt::Display) -> ErrorData {
    ErrorData::internal_error(err.to_string(), None)
}
