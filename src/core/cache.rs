//! Persistent playlist cache.
//!
//! One JSON file per collection reference, named by the reference's
//! content hash. Each file holds the ordered `[title, reference]` pairs the
//! collection resolved to.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::{ContentHash, ContentReference};

/// One resolved item: provisional title plus item reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedItem {
    pub title: String,
    pub reference: ContentReference,
}

impl ResolvedItem {
    pub fn new(title: impl Into<String>, reference: impl Into<ContentReference>) -> Self {
        Self {
            title: title.into(),
            reference: reference.into(),
        }
    }
}

/// File-based cache of resolved collections
#[derive(Debug, Clone)]
pub struct PlaylistCache {
    /// Directory holding the `<hash>.json` files
    dir: PathBuf,
}

impl PlaylistCache {
    /// Open a cache rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the entry path for a content hash
    pub fn entry_path(&self, key: &ContentHash) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load a cached entry.
    ///
    /// Returns `Ok(None)` when there is no entry, or when the entry cannot
    /// be parsed; a malformed entry is logged and treated as a miss.
    pub async fn load(&self, key: &ContentHash) -> Result<Option<Vec<ResolvedItem>>> {
        let path = self.entry_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read cache entry: {}", path.display()))?;

        match serde_json::from_str::<Vec<(String, String)>>(&content) {
            Ok(pairs) => {
                debug!(path = %path.display(), items = pairs.len(), "Cache hit");
                Ok(Some(
                    pairs
                        .into_iter()
                        .map(|(title, reference)| ResolvedItem::new(title, reference))
                        .collect(),
                ))
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring malformed cache entry");
                Ok(None)
            }
        }
    }

    /// Store an entry, replacing any previous one
    pub async fn store(&self, key: &ContentHash, items: &[ResolvedItem]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create cache directory: {}", self.dir.display()))?;

        let pairs: Vec<(&str, &str)> = items
            .iter()
            .map(|item| (item.title.as_str(), item.reference.as_str()))
            .collect();
        let content = serde_json::to_string(&pairs).context("Failed to serialize cache entry")?;

        // Write then rename so readers never see a half-written entry
        let path = self.entry_path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("Failed to write cache entry: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to move cache entry into place: {}", path.display()))?;

        Ok(path)
    }
}
