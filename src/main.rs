// src/main.rs
// =============================================================================
// This is the entry point of readme-flatten.
//
// What happens here:
// 1. Install the tracing subscriber (RUST_LOG controls verbosity)
// 2. Parse command-line arguments / environment using clap
// 3. Build the Config and the GitHub client once
// 4. Dispatch to the subcommand: run the server, or fetch a single README
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - runtime configuration
mod document; // src/document.rs - assembling the served document
mod github; // src/github/ - README and metadata from GitHub
mod render; // src/render/ - markdown -> HTML -> Elements
mod server; // src/server/ - HTTP endpoint

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use github::{GitHubClient, RepoHost};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %format!("{e:#}"), "fatal error");
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `fetch` can print JSON on stdout
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

async fn run() -> Result<()> {
    // A missing GITHUB_TOKEN makes clap print usage and exit here
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    let host: Arc<dyn RepoHost> = Arc::new(GitHubClient::new(&config)?);

    match cli.command {
        Commands::Serve { port } => {
            let state = server::AppState {
                host,
                request_timeout: config.request_timeout,
            };
            server::serve(state, port).await
        }
        Commands::Fetch { repo, raw } => handle_fetch(host.as_ref(), &config, &repo, raw).await,
    }
}

// Handles the 'fetch' subcommand
async fn handle_fetch(host: &dyn RepoHost, config: &Config, repo_ref: &str, raw: bool) -> Result<()> {
    let (owner, repo) = github::parse_repo_ref(repo_ref)?;

    if raw {
        let markdown = host.fetch_readme(&owner, &repo).await?;
        print!("{markdown}");
        return Ok(());
    }

    let document = document::build_document(host, &owner, &repo, config.request_timeout).await?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does main() call run()?
//    - main can't use ? on errors and pick an exit code at the same time
//    - run() returns Result, and main turns Ok/Err into 0/2
//
// 2. Why Arc<dyn RepoHost>?
//    - dyn RepoHost = "some type implementing RepoHost", chosen at runtime
//    - Arc lets the server share that one client across every request task
//
// 3. Why log to stderr?
//    - `fetch` prints JSON on stdout, so it can be piped into jq
//    - logs on stderr never get mixed into that output
// -----------------------------------------------------------------------------
