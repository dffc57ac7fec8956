// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Strategy:
// - One shared reqwest Client (connection pooling) with GitHub's headers
// - GET /repos/{owner}/{repo}/readme  -> base64 README, decoded to markdown
// - GET /repos/{owner}/{repo}         -> repository metadata
// - Every request carries the bearer token from Config
//
// Also here: parsing "owner/repo" or a GitHub URL into its two parts.
//
// Rust concepts:
// - async functions: For network I/O
// - Result + context: every failure says which call went wrong
// - Generics with DeserializeOwned: one helper fetches any JSON shape
// =============================================================================

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::metadata::{Metadata, RepoInfo};
use super::readme::ReadmeResponse;
use super::RepoHost;
use crate::config::Config;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

// GitHub-backed implementation of RepoHost
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: Url,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.github_token))
            .context("GitHub token contains characters not allowed in a header")?;
        // Keeps the token out of Debug output
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    // Builds {api}/repos/{owner}/{repo}[/suffix]
    fn repo_url(&self, owner: &str, repo: &str, suffix: Option<&str>) -> Result<Url> {
        let mut url = self.api_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("API URL cannot be a base: {}", self.api_url))?;
            segments.pop_if_empty().push("repos").push(owner).push(repo);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    // GETs a URL and deserializes the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "requesting GitHub API");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("error making request to {url}"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("error reading response from {url}"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "API request failed with status code: {}, body: {}",
                status.as_u16(),
                body
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("error parsing JSON from {url}"))
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String> {
        let url = self.repo_url(owner, repo, Some("readme"))?;
        let response: ReadmeResponse = self.get_json(url).await?;
        response
            .decode()
            .with_context(|| format!("failed to decode README of {owner}/{repo}"))
    }

    async fn fetch_metadata(&self, owner: &str, repo: &str) -> Result<Metadata> {
        let url = self.repo_url(owner, repo, None)?;
        let info: RepoInfo = self.get_json(url).await?;
        info.into_metadata()
    }
}

// Parses a repository reference into (owner, repo)
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main (extra path is ignored)
pub fn parse_repo_ref(input: &str) -> Result<(String, String)> {
    let input = input.trim();

    let path = if input.contains("github.com") {
        let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
            input.to_string()
        } else {
            format!("https://{input}")
        };
        let url = Url::parse(&with_scheme).map_err(|e| anyhow!("Invalid URL '{}': {}", input, e))?;
        match url.host_str() {
            Some("github.com") | Some("www.github.com") => url.path().to_string(),
            _ => return Err(anyhow!("Not a GitHub URL: {}", input)),
        }
    } else if input.contains("://") {
        return Err(anyhow!("Not a GitHub URL: {}", input));
    } else {
        input.to_string()
    };

    let mut parts = path.split('/').filter(|part| !part.is_empty());
    let (owner, repo) = match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) => (owner, repo),
        _ => return Err(anyhow!("Expected owner/repo, got: {}", input)),
    };

    let repo = repo.trim_end_matches(".git");
    if repo.is_empty() {
        return Err(anyhow!("Expected owner/repo, got: {}", input));
    }

    Ok((owner.to_string(), repo.to_string()))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is DeserializeOwned?
//    - "can be deserialized without borrowing from the input"
//    - get_json::<ReadmeResponse> and get_json::<RepoInfo> share one helper
//
// 2. Why check status before parsing JSON?
//    - GitHub returns JSON error bodies too ({"message": "Not Found"})
//    - Parsing that as a README would give a confusing error
//
// 3. What does path_segments_mut() do?
//    - Edits the URL path one segment at a time
//    - Each segment is percent-encoded for us
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(api_url: &str) -> GitHubClient {
        let config = Config {
            github_token: "test-token".to_string(),
            api_url: Url::parse(api_url).unwrap(),
            request_timeout: Duration::from_secs(5),
        };
        GitHubClient::new(&config).unwrap()
    }

    #[test]
    fn test_parse_shorthand() {
        let (owner, repo) = parse_repo_ref("rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_github_url() {
        let (owner, repo) = parse_repo_ref("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(repo, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let (owner, repo) = parse_repo_ref("github.com/user/repo.git").unwrap();
        assert_eq!(owner, "user");
        assert_eq!(repo, "repo");
    }

    #[test]
    fn test_parse_ignores_extra_path() {
        let (owner, repo) = parse_repo_ref("https://www.github.com/user/repo/tree/main").unwrap();
        assert_eq!((owner.as_str(), repo.as_str()), ("user", "repo"));
    }

    #[test]
    fn test_parse_invalid_refs() {
        assert!(parse_repo_ref("https://gitlab.com/user/repo").is_err());
        assert!(parse_repo_ref("just-owner").is_err());
        assert!(parse_repo_ref("https://github.com/user").is_err());
    }

    #[test]
    fn test_repo_urls() {
        let github = client("https://api.github.com");
        assert_eq!(
            github.repo_url("octo", "hello", Some("readme")).unwrap().as_str(),
            "https://api.github.com/repos/octo/hello/readme"
        );
        assert_eq!(
            github.repo_url("octo", "hello", None).unwrap().as_str(),
            "https://api.github.com/repos/octo/hello"
        );
    }

    #[test]
    fn test_repo_url_keeps_base_path() {
        let github = client("https://ghe.example.com/api/v3/");
        assert_eq!(
            github.repo_url("octo", "hello", None).unwrap().as_str(),
            "https://ghe.example.com/api/v3/repos/octo/hello"
        );
    }
}
