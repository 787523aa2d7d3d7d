//! Node construction with the run's shared authorship and collaborators.

use std::sync::Arc;

use crate::adapters::{Collaborators, MediaFetcher, MetadataSource};
use crate::domain::Authorship;

use super::cache::ResolvedItem;
use super::media::MediaNode;
use super::node::ContainerNode;

/// Builds nodes wired to the same authorship and fetch collaborators
#[derive(Clone)]
pub struct NodeFactory {
    authorship: Arc<Authorship>,
    fetcher: Arc<dyn MediaFetcher>,
    metadata: Arc<dyn MetadataSource>,
}

impl NodeFactory {
    pub fn new(authorship: Authorship, collaborators: &Collaborators) -> Self {
        Self {
            authorship: Arc::new(authorship),
            fetcher: collaborators.fetcher.clone(),
            metadata: collaborators.metadata.clone(),
        }
    }

    pub fn authorship(&self) -> &Authorship {
        &self.authorship
    }

    /// Empty topic container
    pub fn container(
        &self,
        source_id: impl Into<String>,
        title: impl Into<String>,
        language: impl Into<String>,
    ) -> ContainerNode {
        ContainerNode::new(source_id, title, language, self.authorship.clone())
    }

    /// Pending media node for a resolved item
    pub fn media(&self, item: ResolvedItem, language: impl Into<String>) -> MediaNode {
        MediaNode::new(
            item.reference,
            item.title,
            language,
            self.authorship.clone(),
            self.fetcher.clone(),
            self.metadata.clone(),
        )
    }
}
