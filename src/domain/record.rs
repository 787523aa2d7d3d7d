//! Serializable tree records.
//!
//! These are the records handed to the packaging step. Field names, field
//! order and nesting are the contract consumed downstream.

use serde::{Deserialize, Serialize};

/// Maximum length (in characters) of a channel description
pub const MAX_DESCRIPTION_CHARS: usize = 400;

/// Root record of the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub source_domain: String,
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub author: String,
    pub language: String,
    pub license: License,
    pub children: Vec<NodeRecord>,
}

/// A rendered child: either a topic container or a media leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeRecord {
    Topic(TopicRecord),
    #[serde(rename = "video")]
    Media(MediaRecord),
}

impl NodeRecord {
    /// Stable identifier of the record
    pub fn source_id(&self) -> &str {
        match self {
            NodeRecord::Topic(topic) => &topic.source_id,
            NodeRecord::Media(media) => &media.source_id,
        }
    }

    /// Display title of the record
    pub fn title(&self) -> &str {
        match self {
            NodeRecord::Topic(topic) => &topic.title,
            NodeRecord::Media(media) => &media.title,
        }
    }

    /// Children of a topic record (media records have none)
    pub fn children(&self) -> &[NodeRecord] {
        match self {
            NodeRecord::Topic(topic) => &topic.children,
            NodeRecord::Media(_) => &[],
        }
    }

    pub fn is_topic(&self) -> bool {
        matches!(self, NodeRecord::Topic(_))
    }
}

/// Grade, subject or lesson container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub source_id: String,
    pub title: String,
    pub description: Option<String>,
    pub language: String,
    pub author: String,
    pub license: License,
    pub children: Vec<NodeRecord>,
}

/// Downloaded media item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub source_id: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub files: Vec<FileRecord>,
    pub language: String,
    pub license: License,
}

/// File attached to a media record. The primary payload comes first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "file_type", rename_all = "snake_case")]
pub enum FileRecord {
    /// Downloaded payload on local disk
    Video { path: String },

    /// Subtitle track fetched by the packager from the item's platform id
    Subtitles { youtube_id: String, language: String },
}

/// License block attached to every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub license_id: String,
    pub copyright_holder: String,
    pub description: Option<String>,
}

impl License {
    pub fn new(license_id: impl Into<String>, copyright_holder: impl Into<String>) -> Self {
        Self {
            license_id: license_id.into(),
            copyright_holder: copyright_holder.into(),
            description: None,
        }
    }
}

/// Static authorship shared by every record of a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorship {
    pub author: String,
    pub license: License,
}

/// Truncate a description to the channel limit, on a character boundary
pub fn truncate_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_CHARS).collect()
}
