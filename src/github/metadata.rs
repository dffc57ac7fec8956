// src/github/metadata.rs
// =============================================================================
// Repository metadata shown alongside the README.
//
// GET /repos/{owner}/{repo} returns a large JSON object; we only read:
//   name, full_name, description (may be null), updated_at, owner.login
//
// Rules:
// - title is the description when it has text, otherwise the repo name
// - updated_at is normalized to UTC, e.g. "2024-03-01T09:30:00Z"
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// Metadata half of the served Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: String,
    /// `owner/repo`
    pub repository: String,
    pub last_updated: String,
    pub author: String,
    pub description: String,
}

// The subset of GitHub's repository response we care about
#[derive(Debug, Deserialize)]
pub struct RepoInfo {
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub updated_at: String,
    pub owner: RepoOwner,
}

#[derive(Debug, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

impl RepoInfo {
    pub fn into_metadata(self) -> Result<Metadata> {
        let last_updated = normalize_timestamp(&self.updated_at)?;
        let description = self.description.unwrap_or_default();

        let title = match description.trim() {
            "" => self.name,
            text => text.to_string(),
        };

        Ok(Metadata {
            title,
            repository: self.full_name,
            last_updated,
            author: self.owner.login,
            description,
        })
    }
}

// Parses an RFC 3339 timestamp in any offset and re-renders it in UTC
fn normalize_timestamp(raw: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid updated_at timestamp: {raw}"))?;
    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is #[serde(rename_all = "camelCase")]?
//    - last_updated is written to JSON as lastUpdated
//
// 2. What is Option<String> for description?
//    - GitHub sends null when a repo has no description
//    - unwrap_or_default() turns None into an empty String
//
// 3. What does with_timezone(&Utc) do?
//    - Same instant in time, expressed with a +00:00 offset
// -----------------------------------------------------------------------------
