// src/document.rs
// =============================================================================
// Builds the Document served for one repository.
//
// What happens here:
// 1. Fetch README -> render markdown -> flatten HTML   (one future)
// 2. Fetch repository metadata                        (another future)
// 3. Run both concurrently under one deadline
// 4. Assemble { metadata, content, rawContent }
//
// Any failure (or the deadline) aborts the whole thing: there are no
// partial documents.
// =============================================================================

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::github::{Metadata, RepoHost};
use crate::render::{self, Element};

// The JSON document handed to the front end.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub metadata: Metadata,
    pub content: Vec<Element>,
    /// README markdown before rendering.
    pub raw_content: String,
}

pub async fn build_document(
    host: &dyn RepoHost,
    owner: &str,
    repo: &str,
    deadline: Duration,
) -> Result<Document> {
    let content = async {
        let raw = host
            .fetch_readme(owner, repo)
            .await
            .with_context(|| format!("failed to fetch README for {owner}/{repo}"))?;
        // Rendering is CPU-bound, keep it off the async worker threads
        let (raw, elements) = tokio::task::spawn_blocking(move || {
            let elements = render::render_elements(&raw);
            (raw, elements)
        })
        .await
        .context("README rendering task failed")?;
        debug!(elements = elements.len(), "flattened README");
        Ok::<_, anyhow::Error>((raw, elements))
    };

    let metadata = async {
        host.fetch_metadata(owner, repo)
            .await
            .with_context(|| format!("failed to fetch metadata for {owner}/{repo}"))
    };

    let ((raw_content, content), metadata) =
        tokio::time::timeout(deadline, async { tokio::try_join!(content, metadata) })
            .await
            .map_err(|_| anyhow!("timed out after {:?} fetching {}/{}", deadline, owner, repo))??;

    info!(repository = %metadata.repository, elements = content.len(), "built README document");

    Ok(Document {
        metadata,
        content,
        raw_content,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does tokio::try_join! do?
//    - Polls several futures at the same time
//    - Returns all their Ok values, or the first Err (dropping the others)
//
// 2. What does tokio::time::timeout do?
//    - Wraps a future; if it isn't done in time you get Err(Elapsed)
//    - Dropping the inner future cancels the pending HTTP requests
//
// 3. Why spawn_blocking?
//    - Rendering and flattening never .await, they just use the CPU
//    - spawn_blocking moves that work to a thread pool meant for it
//    - `move` hands `raw` to that thread, and we get it back in the result
// -----------------------------------------------------------------------------
