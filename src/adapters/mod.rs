//! Adapter interfaces for external media services.
//!
//! The tree pipeline talks to three narrow collaborators: collection
//! expansion, item metadata, and media fetch. Each is a trait so the
//! `yt-dlp` adapter can be swapped for in-memory doubles in tests.

pub mod ytdlp;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ContentReference;

pub use ytdlp::YtDlpAdapter;

/// Errors raised while expanding a collection or reading item metadata
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Unsupported URL: {0}")]
    Unsupported(String),

    #[error("Content unavailable: {0}")]
    Unavailable(String),

    #[error("Content too short: {0}")]
    ContentTooShort(String),

    #[error("Collection has no entries: {0}")]
    Empty(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Extraction tool not found: {0}")]
    ToolNotFound(String),

    #[error("Failed to parse extractor output: {0}")]
    Parse(String),

    #[error("Extraction failed: {0}")]
    Failed(String),
}

/// Metadata of a single item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMetadata {
    /// Platform id of the item (e.g. YouTube video id)
    pub id: String,

    /// Display title
    pub title: String,

    /// Languages with an available subtitle track, in a stable order
    pub subtitle_languages: Vec<String>,
}

/// Result of a fetch call
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedMedia {
    /// Final local path of the payload (None when downloading is disabled)
    pub local_path: Option<PathBuf>,

    /// Authoritative title reported by the fetch
    pub title: Option<String>,
}

/// Turns a collection reference into its ordered item references
#[async_trait]
pub trait CollectionExpander: Send + Sync {
    async fn expand(
        &self,
        reference: &ContentReference,
    ) -> Result<Vec<ContentReference>, ExtractionError>;
}

/// Reads per-item metadata
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn metadata(&self, reference: &ContentReference)
        -> Result<ItemMetadata, ExtractionError>;
}

/// Downloads an item's payload
///
/// Errors are transport failures and are not recovered by the pipeline.
/// With `enabled == false` an implementation must return without a path.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(
        &self,
        reference: &ContentReference,
        base_path: &Path,
        enabled: bool,
    ) -> Result<FetchedMedia>;
}

/// The set of collaborators a run is wired with
#[derive(Clone)]
pub struct Collaborators {
    pub expander: Arc<dyn CollectionExpander>,
    pub metadata: Arc<dyn MetadataSource>,
    pub fetcher: Arc<dyn MediaFetcher>,
}

impl Collaborators {
    /// Wire all three collaborators to one adapter
    pub fn from_adapter<A>(adapter: A) -> Self
    where
        A: CollectionExpander + MetadataSource + MediaFetcher + 'static,
    {
        let adapter = Arc::new(adapter);
        Self {
            expander: adapter.clone(),
            metadata: adapter.clone(),
            fetcher: adapter,
        }
    }
}
