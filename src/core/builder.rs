//! Tree builder: drives Grade -> Subject -> Lesson -> Item materialization.
//!
//! Two phases, both strictly sequential:
//! 1. `assemble`: resolve every lesson reference into pending media nodes
//! 2. `build`: download each pending node, then fold lessons into subjects,
//!    subjects into grades, grades into the channel root
//!
//! Download errors abort the run. Resolution errors never do.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{info, instrument};

use crate::adapters::Collaborators;
use crate::config::{ChannelConfig, RunOptions};
use crate::curriculum::Curriculum;
use crate::domain::{truncate_description, ChannelRecord};

use super::cache::PlaylistCache;
use super::factory::NodeFactory;
use super::hierarchy::GradeNode;
use super::node::{ContainerNode, TreeNode};
use super::report::RunReport;
use super::resolver::PlaylistResolver;

/// Result of a build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub tree: ChannelRecord,
    pub report: RunReport,
}

/// Owns channel metadata and the traversal that produces the tree
pub struct TreeBuilder {
    channel: ChannelConfig,
    options: RunOptions,
    resolver: PlaylistResolver,
    factory: NodeFactory,
    download_dir: PathBuf,
}

impl TreeBuilder {
    pub fn new(
        channel: ChannelConfig,
        options: RunOptions,
        collaborators: Collaborators,
        cache: PlaylistCache,
        download_dir: impl Into<PathBuf>,
    ) -> Self {
        let resolver = PlaylistResolver::new(
            collaborators.expander.clone(),
            collaborators.metadata.clone(),
            cache,
            options.reuse_cache,
        );
        let factory = NodeFactory::new(channel.authorship(), &collaborators);

        Self {
            channel,
            options,
            resolver,
            factory,
            download_dir: download_dir.into(),
        }
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    pub fn resolver(&self) -> &PlaylistResolver {
        &self.resolver
    }

    /// Resolve the whole curriculum into grades with pending media nodes
    #[instrument(skip(self, curriculum), fields(grades = curriculum.len()))]
    pub async fn assemble(&self, curriculum: &Curriculum) -> Vec<GradeNode> {
        let mut grades = Vec::with_capacity(curriculum.len());

        for entry in curriculum.grades() {
            info!(grade = %entry.source_id, "Assembling grade");
            grades.push(
                GradeNode::from_entry(entry, &self.channel.language, &self.resolver, &self.factory)
                    .await,
            );
        }

        grades
    }

    /// Download pending media and fold everything into the channel record
    #[instrument(skip(self, grades), fields(download = self.options.download))]
    pub async fn build(&self, grades: Vec<GradeNode>) -> Result<BuildOutput> {
        let mut report = RunReport::new(self.options.download, self.options.reuse_cache);
        let mut root = self.factory.container(
            &self.channel.source_id,
            &self.channel.name,
            &self.channel.language,
        );

        for mut grade in grades {
            for mut subject in grade.take_subjects() {
                report.record_subject(grade.source_id(), subject.source_id(), subject.outcomes());

                for mut lesson in subject.take_lessons() {
                    for mut media in lesson.take_pending() {
                        media
                            .download(self.options.download, &self.download_dir)
                            .await
                            .with_context(|| format!("Failed to fetch {}", media.reference()))?;

                        if media.payload_path().is_some() {
                            report.media_rendered += 1;
                        } else {
                            report.media_absent += 1;
                        }
                        lesson.add_child(media);
                    }
                    subject.add_child(lesson);
                }
                grade.add_child(subject);
            }
            info!(grade = %grade.source_id(), "Grade complete");
            root.add_child(grade);
        }

        report.finish();
        info!(
            resolved = report.resolved(),
            skipped = report.skipped(),
            failed = report.failed(),
            media = report.media_rendered,
            "Tree built"
        );

        Ok(BuildOutput {
            tree: self.channel_record(root),
            report,
        })
    }

    /// Assemble and build in one go
    pub async fn run(&self, curriculum: &Curriculum) -> Result<BuildOutput> {
        let grades = self.assemble(curriculum).await;
        self.build(grades).await
    }

    fn channel_record(&self, root: ContainerNode) -> ChannelRecord {
        let authorship = self.factory.authorship();

        ChannelRecord {
            source_domain: self.channel.domain.clone(),
            source_id: self.channel.source_id.clone(),
            title: self.channel.name.clone(),
            description: truncate_description(&self.channel.description),
            thumbnail: self.channel.thumbnail.clone(),
            author: authorship.author.clone(),
            language: self.channel.language.clone(),
            license: authorship.license.clone(),
            children: root.into_children(),
        }
    }
}

/// Write the tree as pretty JSON
pub async fn write_tree(tree: &ChannelRecord, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create tree directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(tree).context("Failed to serialize tree")?;
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write tree: {}", path.display()))?;

    Ok(())
}
