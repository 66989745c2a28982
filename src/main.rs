//! LeetCode MCP server binary: stdio transport, logging to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};

use leetcode_mcp::auth::{AuthFlow, FileCredentialStore, GraphqlValidator};
use leetcode_mcp::browser::{LocalBrowserCookieSource, SystemBrowserLauncher};
use leetcode_mcp::client::LeetCodeClient;
use leetcode_mcp::config::ServerConfig;
use leetcode_mcp::server::LeetCodeServer;
use leetcode_mcp::submit::SubmissionOrchestrator;
use leetcode_mcp::util::{SystemClock, TokioSleeper};

#[derive(Parser)]
#[command(version, about = "Model Context Protocol server for LeetCode")]
struct Cli {
    /// Site variant: 'global' (leetcode.com) or 'cn' (leetcode.cn).
    #[arg(long)]
    site: Option<String>,
    /// Directory for the stored credential file (default: ~/.leetcode-mcp).
    #[arg(long)]
    credentials_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // stdout carries the MCP protocol; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ServerConfig::from_env()?;
    if let Some(site) = cli.site {
        config.site = site.parse()?;
    }
    if let Some(dir) = cli.credentials_dir {
        config.credentials_dir = Some(dir);
    }

    let store = Arc::new(match &config.credentials_dir {
        Some(dir) => FileCredentialStore::new(dir.clone()),
        None => FileCredentialStore::new_default(),
    });
    let clock = Arc::new(SystemClock);
    let client = LeetCodeClient::new(config.site.base_url());

    let flow = Arc::new(AuthFlow::new(
        &config,
        store.clone(),
        Arc::new(GraphqlValidator::new(config.site.base_url())),
        Arc::new(LocalBrowserCookieSource),
        Arc::new(SystemBrowserLauncher),
        clock,
    ));
    let orchestrator = Arc::new(SubmissionOrchestrator::new(
        &config,
        store,
        client.clone(),
        Arc::new(TokioSleeper),
    ));

    tracing::info!(site = %config.site, "starting LeetCode MCP server on stdio");

    let service = LeetCodeServer::new(client, flow, orchestrator)
        .serve(stdio())
        .await?;
    service.waiting().await?;

    Ok(())
}
