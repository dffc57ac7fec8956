// src/config.rs
// =============================================================================
// Runtime configuration, built once at startup from the parsed CLI.
//
// Values come from flags or their environment variables (GITHUB_TOKEN,
// GITHUB_API_URL, REQUEST_TIMEOUT_SECS); clap does that lookup. After this
// point nothing reads the environment again: Config is passed by reference.
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Result};
use url::Url;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for the GitHub API. Never logged.
    pub github_token: String,
    pub api_url: Url,
    /// Deadline for a whole README request (both GitHub calls together).
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let github_token = cli.github_token.trim().to_string();
        if github_token.is_empty() {
            return Err(anyhow!("GITHUB_TOKEN is set but empty"));
        }

        let api_url = Url::parse(&cli.api_url)
            .map_err(|e| anyhow!("Invalid API URL '{}': {}", cli.api_url, e))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(anyhow!("API URL must be http or https: {}", api_url));
        }

        if cli.timeout_secs == 0 {
            return Err(anyhow!("--timeout-secs must be greater than zero"));
        }

        Ok(Self {
            github_token,
            api_url,
            request_timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Config struct instead of reading env vars where needed?
//    - All validation happens in one place, once, at startup
//    - Everything else just borrows &Config
//
// 2. What is Duration?
//    - std's type for a span of time
//    - Duration::from_secs(10) is ten seconds
// -----------------------------------------------------------------------------
