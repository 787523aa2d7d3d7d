//! Lesson aggregation.
//!
//! A lesson wraps the items resolved from its collection references. Items
//! are held as pending media nodes until the traversal downloads them and
//! adds the ones that rendered.

use tracing::{info, warn};

use crate::adapters::ExtractionError;
use crate::domain::{ContentReference, NodeRecord, ReferenceOutcome, ResolutionOutcome};

use super::factory::NodeFactory;
use super::media::MediaNode;
use super::node::{ContainerNode, TreeNode};
use super::resolver::PlaylistResolver;

/// Container for the items of one lesson
#[derive(Debug)]
pub struct LessonNode {
    container: ContainerNode,
    pending: Vec<MediaNode>,
}

impl LessonNode {
    pub fn new(container: ContainerNode) -> Self {
        Self {
            container,
            pending: Vec::new(),
        }
    }

    /// Resolve each reference and queue one media node per resolved item.
    ///
    /// A reference that fails to resolve is logged and skipped; the
    /// remaining references are still expanded.
    pub async fn expand_from_references(
        &mut self,
        references: &[ContentReference],
        resolver: &PlaylistResolver,
        factory: &NodeFactory,
    ) -> Vec<ReferenceOutcome> {
        let mut outcomes = Vec::with_capacity(references.len());

        for reference in references {
            let outcome = match resolver.try_resolve(reference).await {
                Ok(resolution) if resolution.items.is_empty() => ResolutionOutcome::Skipped {
                    reason: "collection resolved to no items".to_string(),
                },
                Ok(resolution) => {
                    let items = resolution.items.len();
                    let language = self.container.language().to_string();
                    self.pending.extend(
                        resolution
                            .items
                            .into_iter()
                            .map(|item| factory.media(item, language.as_str())),
                    );
                    info!(reference = %reference, items, from_cache = resolution.from_cache, "Lesson expanded");
                    ResolutionOutcome::Resolved {
                        items,
                        from_cache: resolution.from_cache,
                    }
                }
                Err(ExtractionError::Empty(_)) => ResolutionOutcome::Skipped {
                    reason: "collection resolved to no items".to_string(),
                },
                Err(e) => {
                    warn!(reference = %reference, error = %e, "Skipping reference that failed to resolve");
                    ResolutionOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            outcomes.push(ReferenceOutcome {
                reference: reference.clone(),
                outcome,
            });
        }

        outcomes
    }

    /// Number of media nodes waiting for download
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take the pending media nodes for download
    pub fn take_pending(&mut self) -> Vec<MediaNode> {
        std::mem::take(&mut self.pending)
    }

    /// Add a downloaded media node
    pub fn add_child(&mut self, media: MediaNode) {
        self.container.add_child(media);
    }
}

impl TreeNode for LessonNode {
    fn source_id(&self) -> &str {
        self.container.source_id()
    }

    fn title(&self) -> &str {
        self.container.title()
    }

    fn language(&self) -> &str {
        self.container.language()
    }

    /// A single child is returned directly instead of a one-child topic
    fn render(self) -> Option<NodeRecord> {
        if self.container.len() == 1 {
            return self.container.into_children().pop();
        }
        self.container.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Authorship, License};
    use std::sync::Arc;

    fn container(id: &str) -> ContainerNode {
        ContainerNode::new(
            id,
            id.to_uppercase(),
            "ar",
            Arc::new(Authorship {
                author: "Author".to_string(),
                license: License::new("CC BY", "Holder"),
            }),
        )
    }

    fn rendered(id: &str) -> NodeRecord {
        container(id).render().unwrap()
    }

    #[test]
    fn test_single_child_collapses() {
        let mut inner = container("lesson");
        inner.insert(rendered("u1"));

        let record = LessonNode::new(inner).render().unwrap();
        assert_eq!(record.source_id(), "u1");
    }

    #[test]
    fn test_many_children_wrap_in_topic() {
        let mut inner = container("lesson");
        inner.insert(rendered("u1"));
        inner.insert(rendered("u2"));

        let record = LessonNode::new(inner).render().unwrap();
        assert!(record.is_topic());
        assert_eq!(record.source_id(), "lesson");
        let ids: Vec<_> = record.children().iter().map(|c| c.source_id()).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
    }

    #[test]
    fn test_no_children_renders_empty_topic() {
        let record = LessonNode::new(container("lesson")).render().unwrap();
        assert!(record.is_topic());
        assert!(record.children().is_empty());
    }
}
