//! Playlist resolution with a persistent cache.
//!
//! Resolving a collection costs one expansion call plus one metadata call
//! per item, so results are memoized on disk keyed by the reference's
//! content hash.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::adapters::{CollectionExpander, ExtractionError, MetadataSource};
use crate::domain::ContentReference;

use super::cache::{PlaylistCache, ResolvedItem};

/// A resolved collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Items in the order the expander reported them
    pub items: Vec<ResolvedItem>,

    /// Whether the items were read from the cache
    pub from_cache: bool,
}

/// Resolves collection references into ordered (title, item) lists
pub struct PlaylistResolver {
    expander: Arc<dyn CollectionExpander>,
    metadata: Arc<dyn MetadataSource>,
    cache: PlaylistCache,
    reuse_cache: bool,
}

impl PlaylistResolver {
    /// Create a resolver. With `reuse_cache == false` every call goes to
    /// the collaborators, and the fresh result overwrites the cache entry.
    pub fn new(
        expander: Arc<dyn CollectionExpander>,
        metadata: Arc<dyn MetadataSource>,
        cache: PlaylistCache,
        reuse_cache: bool,
    ) -> Self {
        Self {
            expander,
            metadata,
            cache,
            reuse_cache,
        }
    }

    /// Get the underlying cache
    pub fn cache(&self) -> &PlaylistCache {
        &self.cache
    }

    /// Resolve a collection, surfacing extraction errors
    #[instrument(skip(self, reference), fields(reference = %reference))]
    pub async fn try_resolve(
        &self,
        reference: &ContentReference,
    ) -> Result<Resolution, ExtractionError> {
        let key = reference.content_hash();

        if self.reuse_cache {
            match self.cache.load(&key).await {
                Ok(Some(items)) => {
                    debug!(items = items.len(), "Using cached collection");
                    return Ok(Resolution {
                        items,
                        from_cache: true,
                    });
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Cache read failed, resolving again"),
            }
        }

        let item_refs = self.expander.expand(reference).await?;
        info!(items = item_refs.len(), "Expanded collection");

        let mut items = Vec::with_capacity(item_refs.len());
        for item_ref in item_refs {
            match self.metadata.metadata(&item_ref).await {
                Ok(meta) => items.push(ResolvedItem {
                    title: meta.title,
                    reference: item_ref,
                }),
                Err(e) => {
                    warn!(item = %item_ref, error = %e, "Dropping item without metadata");
                }
            }
        }

        if items.is_empty() {
            return Err(ExtractionError::Empty(reference.to_string()));
        }

        if let Err(e) = self.cache.store(&key, &items).await {
            warn!(error = %e, "Failed to persist resolved collection");
        }

        Ok(Resolution {
            items,
            from_cache: false,
        })
    }

    /// Resolve a collection; failures are logged and yield an empty list
    pub async fn resolve(&self, reference: &ContentReference) -> Vec<ResolvedItem> {
        match self.try_resolve(reference).await {
            Ok(resolution) => resolution.items,
            Err(e) => {
                warn!(reference = %reference, error = %e, "Collection resolution failed");
                Vec::new()
            }
        }
    }
}
