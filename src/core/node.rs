//! Tree node capability and the generic container node.
//!
//! Rendering consumes a node: once a node has been folded into its parent
//! it cannot be revisited.

use std::sync::Arc;

use tracing::warn;

use crate::domain::{Authorship, NodeRecord, TopicRecord};

/// Common capability of every node in the tree
pub trait TreeNode {
    /// Stable identifier
    fn source_id(&self) -> &str;

    /// Display title
    fn title(&self) -> &str;

    /// Language tag
    fn language(&self) -> &str;

    /// Finalize into a record; `None` means the node contributes nothing
    fn render(self) -> Option<NodeRecord>;
}

/// Topic container holding rendered children in insertion order
#[derive(Debug, Clone)]
pub struct ContainerNode {
    source_id: String,
    title: String,
    language: String,
    description: Option<String>,
    authorship: Arc<Authorship>,
    children: Vec<NodeRecord>,
}

impl ContainerNode {
    /// Create an empty container
    pub fn new(
        source_id: impl Into<String>,
        title: impl Into<String>,
        language: impl Into<String>,
        authorship: Arc<Authorship>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            title: title.into(),
            language: language.into(),
            description: None,
            authorship,
            children: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Render a child node and insert it (absent renders are ignored)
    pub fn add_child<N: TreeNode>(&mut self, node: N) {
        if let Some(record) = node.render() {
            self.insert(record);
        }
    }

    /// Insert an already rendered record.
    ///
    /// A record whose `source_id` is already present replaces the earlier
    /// one in place, keeping the earlier position.
    pub fn insert(&mut self, record: NodeRecord) {
        if let Some(existing) = self
            .children
            .iter_mut()
            .find(|c| c.source_id() == record.source_id())
        {
            warn!(
                parent = %self.source_id,
                source_id = %record.source_id(),
                "Duplicate source_id, replacing earlier child"
            );
            *existing = record;
        } else {
            self.children.push(record);
        }
    }

    /// Rendered children so far
    pub fn children(&self) -> &[NodeRecord] {
        &self.children
    }

    /// Number of rendered children
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Take the rendered children, consuming the container
    pub fn into_children(self) -> Vec<NodeRecord> {
        self.children
    }
}

impl TreeNode for ContainerNode {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn render(self) -> Option<NodeRecord> {
        Some(NodeRecord::Topic(TopicRecord {
            source_id: self.source_id,
            title: self.title,
            description: self.description,
            language: self.language,
            author: self.authorship.author.clone(),
            license: self.authorship.license.clone(),
            children: self.children,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::License;

    fn authorship() -> Arc<Authorship> {
        Arc::new(Authorship {
            author: "Author".to_string(),
            license: License::new("CC BY", "Holder"),
        })
    }

    fn topic(id: &str, title: &str) -> ContainerNode {
        ContainerNode::new(id, title, "ar", authorship())
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut parent = topic("p", "Parent");
        parent.add_child(topic("b", "B"));
        parent.add_child(topic("a", "A"));
        parent.add_child(topic("c", "C"));

        let ids: Vec<_> = parent.children().iter().map(|c| c.source_id()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_source_id_replaces_in_place() {
        let mut parent = topic("p", "Parent");
        parent.add_child(topic("a", "First"));
        parent.add_child(topic("b", "B"));
        parent.add_child(topic("a", "Second"));

        assert_eq!(parent.len(), 2);
        assert_eq!(parent.children()[0].source_id(), "a");
        assert_eq!(parent.children()[0].title(), "Second");
        assert_eq!(parent.children()[1].source_id(), "b");
    }

    #[test]
    fn test_render_empty_container_is_topic() {
        let record = topic("g1", "Grade 1").render().unwrap();

        match record {
            NodeRecord::Topic(t) => {
                assert_eq!(t.source_id, "g1");
                assert_eq!(t.language, "ar");
                assert_eq!(t.author, "Author");
                assert!(t.description.is_none());
                assert!(t.children.is_empty());
            }
            NodeRecord::Media(_) => panic!("expected topic"),
        }
    }
}
