//! Content references and their content hashes.
//!
//! A reference is the external locator of a collection or a single item.
//! References are normalized once, at construction, so that the same
//! locator always yields the same `source_id` and the same cache key.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Normalized external locator (playlist or single item URL)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentReference(String);

impl ContentReference {
    /// Create a reference from a raw, possibly untidy locator
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    /// Get the normalized string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Content hash of the normalized reference (cache key)
    pub fn content_hash(&self) -> ContentHash {
        ContentHash::of(&self.0)
    }
}

impl std::fmt::Display for ContentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ContentReference {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ContentReference {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

/// SHA-256 digest of a normalized reference, hex encoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(String);

impl ContentHash {
    fn of(normalized: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the raw hex value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim whitespace and trailing separators, and turn embed players into watch links
fn normalize(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/').trim();

    match trimmed.split_once("/embed/") {
        Some((host, rest)) if is_youtube(host) => {
            let video_id = rest.split(['?', '#', '/']).next().unwrap_or_default();
            format!("{}/watch?v={}", host, video_id)
        }
        _ => trimmed.to_string(),
    }
}

fn is_youtube(host: &str) -> bool {
    let host = host.to_lowercase();
    host.contains("youtube.com") || host.contains("youtube-nocookie.com")
}
