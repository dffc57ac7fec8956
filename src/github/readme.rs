// src/github/readme.rs
// =============================================================================
// Decoding GitHub's README response.
//
// GET /repos/{owner}/{repo}/readme returns JSON like:
//   { "content": "IyBIZWxsbwo=\n...", "encoding": "base64", ... }
//
// The base64 payload is wrapped at 60 columns with '\n', so the line breaks
// are stripped before decoding.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

// Structure to match GitHub's README response
// (only the fields we need, serde ignores the rest)
#[derive(Debug, Deserialize)]
pub struct ReadmeResponse {
    pub content: String,
    pub encoding: String,
}

impl ReadmeResponse {
    // Decodes the README into markdown text.
    pub fn decode(&self) -> Result<String> {
        if self.encoding != "base64" {
            return Err(anyhow!("unsupported README encoding: {}", self.encoding));
        }
        decode_content(&self.content)
    }
}

// Strips line breaks from a base64 payload and decodes it as UTF-8 text
pub fn decode_content(content: &str) -> Result<String> {
    let clean: String = content
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    let bytes = STANDARD
        .decode(clean.as_bytes())
        .context("error decoding base64 README content")?;

    String::from_utf8(bytes).context("README content is not valid UTF-8")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is base64?
//    - A way to carry bytes as plain ASCII text
//    - GitHub wraps it in lines, which the decoder would reject
//
// 2. Why String::from_utf8 instead of from_utf8_lossy?
//    - A README that isn't UTF-8 is reported as an error, not silently mangled
// -----------------------------------------------------------------------------
