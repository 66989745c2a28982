//! LeetCode MCP server.
//!
//! Exposes LeetCode problems, user stats, and solution submission as MCP
//! tools, resources, and prompts. The interesting part is credential
//! lifecycle management: LeetCode has no official authentication API, so
//! sessions are established from browser cookies, validated against a live
//! endpoint, persisted locally, checked for staleness, and re-requested when
//! expired, all driven turn by turn through a stateless tool-call surface.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use leetcode_mcp::auth::{AuthFlow, FileCredentialStore, GraphqlValidator};
//! use leetcode_mcp::browser::{LocalBrowserCookieSource, SystemBrowserLauncher};
//! use leetcode_mcp::client::LeetCodeClient;
//! use leetcode_mcp::config::ServerConfig;
//! use leetcode_mcp::util::SystemClock;
//!
//! let config = ServerConfig::default();
//! let store = Arc::new(FileCredentialStore::new_default());
//! let flow = AuthFlow::new(
//!     &config,
//!     store,
//!     Arc::new(GraphqlValidator::new(config.site.base_url())),
//!     Arc::new(LocalBrowserCookieSource),
//!     Arc::new(SystemBrowserLauncher),
//!     Arc::new(SystemClock),
//! );
//! let client = LeetCodeClient::new(config.site.base_url());
//! ```

pub mod auth;
pub mod browser;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod submit;
pub mod util;
