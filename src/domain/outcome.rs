//! Per-reference resolution outcomes.
//!
//! Failed and skipped references never reach the tree. The outcome keeps
//! them visible in logs and in the run report.

use serde::{Deserialize, Serialize};

use super::reference::ContentReference;

/// What happened to one raw collection reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Resolved into at least one item
    Resolved { items: usize, from_cache: bool },

    /// Resolved cleanly but produced nothing usable
    Skipped { reason: String },

    /// The extraction collaborator reported an error
    Failed { error: String },
}

impl ResolutionOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }
}

/// Outcome of one reference, with where it came from in the curriculum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOutcome {
    pub reference: ContentReference,
    #[serde(flatten)]
    pub outcome: ResolutionOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let outcome = ReferenceOutcome {
            reference: ContentReference::new("https://youtube.com/playlist?list=X"),
            outcome: ResolutionOutcome::Failed {
                error: "Unsupported URL".to_string(),
            },
        };

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["reference"], "https://youtube.com/playlist?list=X");
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "Unsupported URL");
        assert!(!outcome.outcome.is_resolved());
    }
}
