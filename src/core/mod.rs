//! Core tree-assembly logic.
//!
//! This module contains:
//! - PlaylistCache: on-disk memo of resolved collections
//! - PlaylistResolver: collection -> ordered (title, item) list
//! - Nodes: TreeNode capability, containers, media, lessons, subjects, grades
//! - TreeBuilder: the Grade -> Subject -> Lesson -> Item traversal
//! - RunReport: per-reference outcomes of a build

pub mod builder;
pub mod cache;
pub mod factory;
pub mod hierarchy;
pub mod lesson;
pub mod media;
pub mod node;
pub mod report;
pub mod resolver;

// Re-export commonly used types
pub use builder::{write_tree, BuildOutput, TreeBuilder};
pub use cache::{PlaylistCache, ResolvedItem};
pub use factory::NodeFactory;
pub use hierarchy::{GradeNode, SubjectNode};
pub use lesson::LessonNode;
pub use media::{MediaNode, SubtitleTrack};
pub use node::{ContainerNode, TreeNode};
pub use report::{ReportEntry, RunReport};
pub use resolver::{PlaylistResolver, Resolution};
