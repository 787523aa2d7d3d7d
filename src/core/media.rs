//! Media leaf nodes.
//!
//! A media node is created per resolved item, gets its payload path from
//! exactly one `download` call, and renders only if that call produced a
//! local file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::adapters::{MediaFetcher, MetadataSource};
use crate::domain::{Authorship, ContentReference, FileRecord, MediaRecord, NodeRecord};

use super::node::TreeNode;

/// Subtitle track discovered for an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleTrack {
    /// Platform id of the item
    pub youtube_id: String,

    /// Language tag of the track
    pub language: String,
}

/// One downloadable media item
pub struct MediaNode {
    reference: ContentReference,
    /// Title from resolution, used until the payload title is known
    provisional_title: String,
    title_override: Option<String>,
    language: String,
    payload_path: Option<PathBuf>,
    subtitles: Vec<SubtitleTrack>,
    authorship: Arc<Authorship>,
    fetcher: Arc<dyn MediaFetcher>,
    metadata: Arc<dyn MetadataSource>,
}

impl std::fmt::Debug for MediaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaNode")
            .field("reference", &self.reference)
            .field("title", &self.title())
            .field("payload_path", &self.payload_path)
            .field("subtitles", &self.subtitles)
            .finish()
    }
}

impl MediaNode {
    pub fn new(
        reference: ContentReference,
        provisional_title: impl Into<String>,
        language: impl Into<String>,
        authorship: Arc<Authorship>,
        fetcher: Arc<dyn MediaFetcher>,
        metadata: Arc<dyn MetadataSource>,
    ) -> Self {
        Self {
            reference,
            provisional_title: provisional_title.into(),
            title_override: None,
            language: language.into(),
            payload_path: None,
            subtitles: Vec::new(),
            authorship,
            fetcher,
            metadata,
        }
    }

    /// Item reference
    pub fn reference(&self) -> &ContentReference {
        &self.reference
    }

    /// Local payload path, once downloaded
    pub fn payload_path(&self) -> Option<&Path> {
        self.payload_path.as_deref()
    }

    /// Discovered subtitle tracks
    pub fn subtitles(&self) -> &[SubtitleTrack] {
        &self.subtitles
    }

    /// Fetch the payload and discover subtitle tracks.
    ///
    /// Fetch errors are returned as-is; they are transport failures and end
    /// the run. Missing subtitle data is not an error.
    #[instrument(skip(self, base_path), fields(reference = %self.reference))]
    pub async fn download(&mut self, enabled: bool, base_path: &Path) -> Result<()> {
        let fetched = self.fetcher.fetch(&self.reference, base_path, enabled).await?;

        if let Some(title) = fetched.title {
            self.title_override = Some(title);
        }

        let Some(path) = fetched.local_path else {
            debug!("No payload produced");
            return Ok(());
        };

        info!(path = %path.display(), "Downloaded");
        self.payload_path = Some(path);

        match self.metadata.metadata(&self.reference).await {
            Ok(meta) => {
                self.subtitles = meta
                    .subtitle_languages
                    .into_iter()
                    .map(|language| SubtitleTrack {
                        youtube_id: meta.id.clone(),
                        language,
                    })
                    .collect();
            }
            Err(e) => debug!(error = %e, "No subtitle data"),
        }

        Ok(())
    }
}

impl TreeNode for MediaNode {
    fn source_id(&self) -> &str {
        self.reference.as_str()
    }

    fn title(&self) -> &str {
        self.title_override
            .as_deref()
            .unwrap_or(&self.provisional_title)
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn render(self) -> Option<NodeRecord> {
        let path = self.payload_path.as_ref()?;

        let mut files = vec![FileRecord::Video {
            path: path.to_string_lossy().into_owned(),
        }];
        files.extend(self.subtitles.iter().map(|track| FileRecord::Subtitles {
            youtube_id: track.youtube_id.clone(),
            language: track.language.clone(),
        }));

        Some(NodeRecord::Media(MediaRecord {
            source_id: self.reference.to_string(),
            title: self.title().to_string(),
            description: String::new(),
            author: self.authorship.author.clone(),
            files,
            language: self.language.clone(),
            license: self.authorship.license.clone(),
        }))
    }
}
