// src/github/mod.rs
// =============================================================================
// This module handles fetching README content and metadata from GitHub.
//
// Currently implements:
// - README download through the REST API (base64-decoded)
// - Repository metadata (title, description, author, last update)
// - Parsing "owner/repo" or GitHub URLs to extract owner/repo
//
// The rest of the app only sees the RepoHost trait, so tests can swap in an
// in-memory host and never touch the network.
// =============================================================================

mod fetch;
mod metadata;
mod readme;

use anyhow::Result;
use async_trait::async_trait;

pub use fetch::{parse_repo_ref, GitHubClient};
pub use metadata::Metadata;

// A source-code host that can serve a repository's README and metadata.
#[async_trait]
pub trait RepoHost: Send + Sync {
    // Raw (pre-render) README markdown for `owner/repo`.
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String>;

    async fn fetch_metadata(&self, owner: &str, repo: &str) -> Result<Metadata>;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a trait?
//    - A set of methods a type promises to have (like an interface)
//    - GitHubClient implements RepoHost; tests use a stub that also does
//
// 2. Why #[async_trait]?
//    - It rewrites async methods so the trait can be used as dyn RepoHost
// -----------------------------------------------------------------------------
