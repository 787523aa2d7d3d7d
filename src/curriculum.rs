//! Curriculum input file.
//!
//! The input is a JSON array of grades. Each grade has a `title`, a
//! `source_id` and a `subjects` list; grades without `subjects` are
//! skipped so partially authored files can still be built.
//!
//! ```json
//! [
//!   {
//!     "title": "Grade 1",
//!     "source_id": "g1",
//!     "subjects": [
//!       {
//!         "title": "Math",
//!         "source_id": "m1",
//!         "lang": "ar",
//!         "lessons": ["https://youtube.com/playlist?list=X"]
//!       }
//!     ]
//!   }
//! ]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One grade record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub title: String,
    pub source_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<SubjectEntry>>,
}

/// One subject record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntry {
    pub title: String,
    pub source_id: String,
    pub lang: String,
    /// Raw collection references, one lesson each
    pub lessons: Vec<String>,
}

/// A loaded curriculum: only grades that carry subjects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Curriculum {
    grades: Vec<GradeEntry>,
}

impl Curriculum {
    /// Load a curriculum file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read curriculum file: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to parse curriculum file: {}", path.display()))
    }

    /// Parse curriculum JSON
    pub fn from_json(content: &str) -> Result<Self> {
        let entries: Vec<GradeEntry> =
            serde_json::from_str(content).context("Failed to parse curriculum JSON")?;

        let total = entries.len();
        let grades: Vec<GradeEntry> = entries
            .into_iter()
            .filter(|g| g.subjects.is_some())
            .collect();

        if grades.len() < total {
            debug!(skipped = total - grades.len(), "Skipping grades without subjects");
        }

        Ok(Self { grades })
    }

    /// Grades in file order
    pub fn grades(&self) -> &[GradeEntry] {
        &self.grades
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }
}

impl GradeEntry {
    /// Subjects of the grade (empty when absent)
    pub fn subjects(&self) -> &[SubjectEntry] {
        self.subjects.as_deref().unwrap_or_default()
    }
}
