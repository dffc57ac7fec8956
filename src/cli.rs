// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API plus the `env` feature: every option can be given
// as a flag or through an environment variable, which is how the server is
// usually configured in a container (GITHUB_TOKEN, PORT, ...).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "readme-flatten",
    version,
    about = "Serve a GitHub README as structured JSON content",
    long_about = "readme-flatten fetches a repository's README from GitHub, renders the markdown \
                  and flattens the HTML into typed elements (headings, paragraphs, links, tables...) \
                  alongside the repository's metadata."
)]
pub struct Cli {
    /// GitHub token sent as a bearer credential (required)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Deadline in seconds for fetching a README and its metadata
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    ///
    /// Example: readme-flatten serve --port 8080
    /// then:    curl 'http://localhost:8080/api/readme?owner=rust-lang&repo=rust'
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },

    /// Fetch one README and print the document as JSON
    ///
    /// Example: readme-flatten fetch rust-lang/rust
    Fetch {
        /// Repository as owner/repo or a GitHub URL
        repo: String,

        /// Print only the decoded README markdown
        #[arg(long)]
        raw: bool,
    },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `env = "GITHUB_TOKEN"` do?
//    - If --github-token isn't passed, clap reads the GITHUB_TOKEN variable
//    - If neither is present, clap prints an error and exits with code 2
//
// 2. Why hide_env_values?
//    - --help would otherwise print the token's current value
//
// 3. What is default_value_t?
//    - A typed default (u16, u64, ...) instead of a string default
// -----------------------------------------------------------------------------
