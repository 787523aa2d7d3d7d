//! Domain types for the content tree.
//!
//! This module contains the core data structures:
//! - References: normalized locators and their content hashes
//! - Records: the serializable tree handed to packaging
//! - Outcomes: per-reference resolution results

pub mod outcome;
pub mod record;
pub mod reference;

// Re-export commonly used types
pub use outcome::{ReferenceOutcome, ResolutionOutcome};
pub use record::{
    truncate_description, Authorship, ChannelRecord, FileRecord, License, MediaRecord, NodeRecord,
    TopicRecord, MAX_DESCRIPTION_CHARS,
};
pub use reference::{ContentHash, ContentReference};
