//! Subject and grade aggregators.
//!
//! Pure structural composition: subjects own lessons, grades own subjects.
//! Resolution happens once, when a subject is built from its raw lesson
//! references.

use tracing::debug;

use crate::curriculum::{GradeEntry, SubjectEntry};
use crate::domain::{ContentReference, NodeRecord, ReferenceOutcome};

use super::factory::NodeFactory;
use super::lesson::LessonNode;
use super::node::{ContainerNode, TreeNode};
use super::resolver::PlaylistResolver;

/// Subject container with its lessons
#[derive(Debug)]
pub struct SubjectNode {
    container: ContainerNode,
    lessons: Vec<LessonNode>,
    outcomes: Vec<ReferenceOutcome>,
}

impl SubjectNode {
    /// Build a subject, one lesson per raw reference.
    ///
    /// References that resolve to nothing produce no lesson.
    pub async fn from_entry(
        entry: &SubjectEntry,
        resolver: &PlaylistResolver,
        factory: &NodeFactory,
    ) -> Self {
        let container = factory.container(&entry.source_id, &entry.title, &entry.lang);
        let mut lessons = Vec::new();
        let mut outcomes = Vec::new();

        for (index, raw) in entry.lessons.iter().enumerate() {
            let reference = ContentReference::new(raw);
            let title = format!("{} {}", entry.title, index + 1);

            let mut lesson =
                LessonNode::new(factory.container(reference.as_str(), title, &entry.lang));
            outcomes.extend(
                lesson
                    .expand_from_references(std::slice::from_ref(&reference), resolver, factory)
                    .await,
            );

            if lesson.has_pending() {
                lessons.push(lesson);
            } else {
                debug!(subject = %entry.source_id, reference = %reference, "No lesson for reference");
            }
        }

        Self {
            container,
            lessons,
            outcomes,
        }
    }

    /// Lessons in reference order
    pub fn lessons(&self) -> &[LessonNode] {
        &self.lessons
    }

    /// Resolution outcome of every raw reference, in input order
    pub fn outcomes(&self) -> &[ReferenceOutcome] {
        &self.outcomes
    }

    /// Take the lessons for traversal
    pub fn take_lessons(&mut self) -> Vec<LessonNode> {
        std::mem::take(&mut self.lessons)
    }

    /// Fold a finished lesson into the subject
    pub fn add_child(&mut self, lesson: LessonNode) {
        self.container.add_child(lesson);
    }
}

impl TreeNode for SubjectNode {
    fn source_id(&self) -> &str {
        self.container.source_id()
    }

    fn title(&self) -> &str {
        self.container.title()
    }

    fn language(&self) -> &str {
        self.container.language()
    }

    fn render(self) -> Option<NodeRecord> {
        self.container.render()
    }
}

/// Grade container with its subjects
#[derive(Debug)]
pub struct GradeNode {
    container: ContainerNode,
    subjects: Vec<SubjectNode>,
}

impl GradeNode {
    /// Build a grade and all of its subjects
    pub async fn from_entry(
        entry: &GradeEntry,
        language: &str,
        resolver: &PlaylistResolver,
        factory: &NodeFactory,
    ) -> Self {
        let container = factory.container(&entry.source_id, &entry.title, language);
        let mut subjects = Vec::with_capacity(entry.subjects().len());

        for subject in entry.subjects() {
            subjects.push(SubjectNode::from_entry(subject, resolver, factory).await);
        }

        Self {
            container,
            subjects,
        }
    }

    pub fn subjects(&self) -> &[SubjectNode] {
        &self.subjects
    }

    /// Take the subjects for traversal
    pub fn take_subjects(&mut self) -> Vec<SubjectNode> {
        std::mem::take(&mut self.subjects)
    }

    /// Fold a finished subject into the grade
    pub fn add_child(&mut self, subject: SubjectNode) {
        self.container.add_child(subject);
    }
}

impl TreeNode for GradeNode {
    fn source_id(&self) -> &str {
        self.container.source_id()
    }

    fn title(&self) -> &str {
        self.container.title()
    }

    fn language(&self) -> &str {
        self.container.language()
    }

    fn render(self) -> Option<NodeRecord> {
        self.container.render()
    }
}
