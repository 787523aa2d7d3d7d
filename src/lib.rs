//! lessontree - curriculum to content tree builder
//!
//! Turns a nested curriculum description (grades -> subjects -> playlist
//! references) into a normalized content tree for a downstream content
//! platform.
//!
//! # Architecture
//!
//! The system is built around a two-phase traversal:
//! - Every playlist reference is resolved into an ordered list of items,
//!   memoized on disk by the reference's content hash
//! - Each item is downloaded, then lessons, subjects and grades are folded
//!   bottom-up into the channel record
//! - Identifiers are the normalized references themselves, so re-runs
//!   produce the same tree
//!
//! # Modules
//!
//! - `adapters`: External media services (yt-dlp)
//! - `core`: Resolver, cache, node hierarchy, tree builder
//! - `domain`: Data structures (references, records, outcomes)
//! - `curriculum`: Input file loading
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Build the tree, reusing cached playlist resolutions
//! lessontree build resources.json --reuse-cache
//!
//! # Resolve a single playlist
//! lessontree resolve "https://www.youtube.com/playlist?list=..."
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod curriculum;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{Collaborators, ExtractionError, YtDlpAdapter};
pub use config::{ChannelConfig, ResolvedConfig, RunOptions};
pub use crate::core::{BuildOutput, PlaylistCache, PlaylistResolver, TreeBuilder, TreeNode};
pub use curriculum::Curriculum;
pub use domain::{ChannelRecord, ContentReference, NodeRecord, ResolutionOutcome};
