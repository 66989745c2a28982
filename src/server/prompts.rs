//! Guided prompts for agents driving the server.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};

pub const AUTH_GUIDE_NAME: &str = "leetcode_authentication_guide";
pub const PROBLEM_GUIDE_NAME: &str = "problem_solving_guide";

const AUTH_GUIDE: &str = r#"# LeetCode Authentication Guide

You are helping a user authenticate with LeetCode. LeetCode has no official
authentication API, so sessions are established from browser cookies.

## Flow

1. Call `start_leetcode_auth`. It registers a 5-minute authorization session,
   tries to open the login page in the user's browser, and returns a
   `sessionId` plus manual instructions.
2. Ask the user to log in. Then either:
   - call `confirm_leetcode_auth` with the `sessionId` to read the cookies
     from the user's browser automatically, or
   - guide the user through DevTools (Application -> Cookies ->
     https://leetcode.com), have them copy the `csrftoken` and
     `LEETCODE_SESSION` values, and call `save_leetcode_credentials`.
3. On success the tool returns the username. Credentials are validated
   against LeetCode before being stored, and are kept locally in
   `~/.leetcode-mcp/credentials.json` with owner-only permissions.

## Troubleshooting

- "Session expired": the 5-minute window passed; start again.
- "Invalid credentials": the user must be logged in, and must copy the
  *entire* cookie values (they are long).
- Use `check_auth_status` any time to see whether credentials exist, whether
  they still validate, and how old they are. A warning appears once they are
  5 days old (typical lifetime is 7-14 days).
- `logout_leetcode` removes the stored credentials."#;

const PROBLEM_GUIDE: &str = r#"# LeetCode Problem-Solving Guide

Workflow for practicing with this server:

1. Pick a problem: `get_daily_challenge` for today's problem, or
   `get_problem` with a slug such as `two-sum`.
2. Discuss the approach before writing code: restate the problem, identify
   the pattern (two pointers, BFS/DFS, dynamic programming, ...), and agree
   on complexity targets.
3. Write the solution in the user's chosen language.
4. Submit with `submit_solution` (requires authentication; see
   `leetcode_authentication_guide`). The result is a single structured
   outcome: accepted with runtime/memory, a rejection with the failing test
   case, a compile/runtime diagnostic, or a timeout if judging is backed up.
5. On rejection, walk through the failing input before editing code.
6. Track progress with `get_user_profile` and `get_recent_submissions`."#;

pub fn all() -> Vec<Prompt> {
    vec![
        Prompt::new(
            AUTH_GUIDE_NAME,
            Some("Step-by-step instructions for guiding a user through LeetCode authentication"),
            None,
        ),
        Prompt::new(
            PROBLEM_GUIDE_NAME,
            Some("Structured workflow for solving and submitting LeetCode problems"),
            None,
        ),
    ]
}

pub fn get(name: &str) -> Option<GetPromptResult> {
    let text = match name {
        AUTH_GUIDE_NAME => AUTH_GUIDE,
        PROBLEM_GUIDE_NAME => PROBLEM_GUIDE,
        _ => return None,
    };
    Some(GetPromptResult {
        description: None,
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    })
}
