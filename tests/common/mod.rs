//! Shared in-memory collaborators for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use lessontree::adapters::{
    CollectionExpander, Collaborators, ExtractionError, FetchedMedia, ItemMetadata, MediaFetcher,
    MetadataSource,
};
use lessontree::config::ChannelConfig;
use lessontree::domain::ContentReference;

/// Expander, metadata source and fetcher backed by fixed tables
#[derive(Default)]
pub struct FakeSource {
    collections: HashMap<String, Vec<String>>,
    titles: HashMap<String, String>,
    subtitles: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    broken_downloads: HashSet<String>,
    pub expand_calls: AtomicUsize,
    pub metadata_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection with `(title, item)` pairs in order
    pub fn collection(mut self, reference: &str, items: &[(&str, &str)]) -> Self {
        self.collections.insert(
            reference.to_string(),
            items.iter().map(|(_, item)| item.to_string()).collect(),
        );
        for (title, item) in items {
            self.titles.insert(item.to_string(), title.to_string());
        }
        self
    }

    /// Register item titles without a collection
    pub fn titles(mut self, items: &[(&str, &str)]) -> Self {
        for (title, item) in items {
            self.titles.insert(item.to_string(), title.to_string());
        }
        self
    }

    /// Make expansion of a reference fail
    pub fn failing(mut self, reference: &str) -> Self {
        self.failing.insert(reference.to_string());
        self
    }

    /// Make the download of an item fail
    pub fn broken_download(mut self, item: &str) -> Self {
        self.broken_downloads.insert(item.to_string());
        self
    }

    /// Attach subtitle languages to an item
    pub fn subtitles(mut self, item: &str, languages: &[&str]) -> Self {
        self.subtitles.insert(
            item.to_string(),
            languages.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    pub fn into_collaborators(self) -> (Arc<Self>, Collaborators) {
        let source = Arc::new(self);
        let collaborators = Collaborators {
            expander: source.clone(),
            metadata: source.clone(),
            fetcher: source.clone(),
        };
        (source, collaborators)
    }

    pub fn expand_count(&self) -> usize {
        self.expand_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CollectionExpander for FakeSource {
    async fn expand(
        &self,
        reference: &ContentReference,
    ) -> Result<Vec<ContentReference>, ExtractionError> {
        self.expand_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing.contains(reference.as_str()) {
            return Err(ExtractionError::Unavailable(reference.to_string()));
        }

        self.collections
            .get(reference.as_str())
            .map(|items| items.iter().map(|i| ContentReference::new(i)).collect())
            .ok_or_else(|| ExtractionError::Unsupported(reference.to_string()))
    }
}

#[async_trait]
impl MetadataSource for FakeSource {
    async fn metadata(&self, reference: &ContentReference) -> Result<ItemMetadata, ExtractionError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);

        let title = self
            .titles
            .get(reference.as_str())
            .ok_or_else(|| ExtractionError::Unavailable(reference.to_string()))?;

        Ok(ItemMetadata {
            id: format!("yt-{}", reference),
            title: title.clone(),
            subtitle_languages: self
                .subtitles
                .get(reference.as_str())
                .cloned()
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl MediaFetcher for FakeSource {
    async fn fetch(
        &self,
        reference: &ContentReference,
        base_path: &Path,
        enabled: bool,
    ) -> Result<FetchedMedia> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if !enabled {
            return Ok(FetchedMedia::default());
        }
        if self.broken_downloads.contains(reference.as_str()) {
            anyhow::bail!("connection reset while downloading {}", reference);
        }

        let title = self.titles.get(reference.as_str()).cloned();
        Ok(FetchedMedia {
            local_path: Some(base_path.join(format!("{}.mp4", reference))),
            title,
        })
    }
}

/// Channel identity used across tests
pub fn channel() -> ChannelConfig {
    ChannelConfig {
        name: "Test Channel".to_string(),
        source_id: "test-channel".to_string(),
        domain: "https://example.org/".to_string(),
        language: "ar".to_string(),
        description: "Channel description".to_string(),
        thumbnail: "https://example.org/thumb.png".to_string(),
        author: "Author".to_string(),
        copyright_holder: "Holder".to_string(),
        license_id: "CC BY".to_string(),
    }
}
