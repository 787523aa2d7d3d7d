//! Run report: what each raw reference resolved to, and what was rendered.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use uuid::Uuid;

use crate::domain::{ReferenceOutcome, ResolutionOutcome};

/// Summary of one build run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier for this run
    pub run_id: Uuid,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    pub download_enabled: bool,
    pub reuse_cache: bool,

    /// Media nodes that rendered into the tree
    pub media_rendered: usize,

    /// Media nodes left out (no payload)
    pub media_absent: usize,

    /// Per-reference outcomes, in curriculum order
    pub references: Vec<ReportEntry>,
}

/// Outcome of one raw reference, with its grade and subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub grade: String,
    pub subject: String,
    #[serde(flatten)]
    pub outcome: ReferenceOutcome,
}

impl RunReport {
    pub fn new(download_enabled: bool, reuse_cache: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            download_enabled,
            reuse_cache,
            media_rendered: 0,
            media_absent: 0,
            references: Vec::new(),
        }
    }

    /// Record the outcomes of one subject
    pub fn record_subject<'a>(
        &mut self,
        grade: &str,
        subject: &str,
        outcomes: impl IntoIterator<Item = &'a ReferenceOutcome>,
    ) {
        self.references
            .extend(outcomes.into_iter().map(|outcome| ReportEntry {
                grade: grade.to_string(),
                subject: subject.to_string(),
                outcome: outcome.clone(),
            }));
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// References that resolved
    pub fn resolved(&self) -> usize {
        self.count(|o| matches!(o, ResolutionOutcome::Resolved { .. }))
    }

    /// References that resolved to nothing
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ResolutionOutcome::Skipped { .. }))
    }

    /// References whose resolution failed
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ResolutionOutcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&ResolutionOutcome) -> bool) -> usize {
        self.references
            .iter()
            .filter(|e| predicate(&e.outcome.outcome))
            .count()
    }

    /// Save the report as pretty JSON
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write run report: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContentReference;
    use tempfile::TempDir;

    fn outcome(reference: &str, outcome: ResolutionOutcome) -> ReferenceOutcome {
        ReferenceOutcome {
            reference: ContentReference::new(reference),
            outcome,
        }
    }

    #[test]
    fn test_counts() {
        let mut report = RunReport::new(true, false);
        let outcomes = vec![
            outcome(
                "a",
                ResolutionOutcome::Resolved {
                    items: 2,
                    from_cache: false,
                },
            ),
            outcome(
                "b",
                ResolutionOutcome::Failed {
                    error: "Unsupported URL: b".to_string(),
                },
            ),
            outcome(
                "c",
                ResolutionOutcome::Skipped {
                    reason: "empty".to_string(),
                },
            ),
        ];
        report.record_subject("g1", "m1", &outcomes);

        assert_eq!(report.resolved(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.references[1].grade, "g1");
        assert_eq!(report.references[1].subject, "m1");
    }

    #[tokio::test]
    async fn test_save_flattens_outcome() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("trees").join("run_report.json");

        let mut report = RunReport::new(false, true);
        report.record_subject(
            "g1",
            "m1",
            &[outcome(
                "https://youtube.com/playlist?list=X",
                ResolutionOutcome::Resolved {
                    items: 2,
                    from_cache: true,
                },
            )],
        );
        report.finish();
        report.save(&path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let entry = &value["references"][0];
        assert_eq!(entry["grade"], "g1");
        assert_eq!(entry["reference"], "https://youtube.com/playlist?list=X");
        assert_eq!(entry["status"], "resolved");
        assert_eq!(entry["items"], 2);
        assert_eq!(entry["from_cache"], true);
        assert!(!value["finished_at"].is_null());
    }
}
