//! yt-dlp adapter for collection expansion, metadata and downloads.
//!
//! Subprocess mode: every call spawns the `yt-dlp` binary and reads its
//! JSON (or print-template) output from stdout.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use super::{
    CollectionExpander, ExtractionError, FetchedMedia, ItemMetadata, MediaFetcher, MetadataSource,
};
use crate::domain::ContentReference;

/// Default maximum video height requested from yt-dlp
pub const DEFAULT_MAX_HEIGHT: u32 = 480;

/// yt-dlp adapter using subprocess mode
#[derive(Debug, Clone)]
pub struct YtDlpAdapter {
    /// Path to the yt-dlp binary (default: "yt-dlp")
    binary_path: String,

    /// Maximum video height for downloads
    max_height: u32,
}

impl Default for YtDlpAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlpAdapter {
    /// Create an adapter using `yt-dlp` from PATH
    pub fn new() -> Self {
        Self::with_binary_path("yt-dlp")
    }

    /// Create an adapter with a custom binary path
    pub fn with_binary_path(binary_path: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }

    /// Set the maximum video height for downloads
    pub fn with_max_height(mut self, max_height: u32) -> Self {
        self.max_height = max_height;
        self
    }

    /// Format selector: mp4 video capped at `max_height` plus m4a audio
    pub fn format_selector(&self) -> String {
        format!(
            "bestvideo[height<={h}][ext=mp4]+bestaudio[ext=m4a]/best[height<={h}][ext=mp4]",
            h = self.max_height
        )
    }

    /// Run yt-dlp and return stdout, mapping failures to extraction errors
    async fn run(&self, args: &[&str]) -> Result<String, ExtractionError> {
        debug!(binary = %self.binary_path, ?args, "Running yt-dlp");

        let output = Command::new(&self.binary_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ExtractionError::ToolNotFound(self.binary_path.clone())
                } else {
                    ExtractionError::Failed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(stderr.trim()));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| ExtractionError::Parse("yt-dlp output is not valid UTF-8".to_string()))
    }
}

/// Map yt-dlp's stderr to a typed extraction error
fn classify_failure(stderr: &str) -> ExtractionError {
    let message = stderr
        .lines()
        .rev()
        .find(|l| l.contains("ERROR"))
        .unwrap_or(stderr)
        .trim()
        .to_string();
    let lower = message.to_lowercase();

    if lower.contains("unsupported url") || lower.contains("is not a valid url") {
        ExtractionError::Unsupported(message)
    } else if lower.contains("video unavailable")
        || lower.contains("has been removed")
        || lower.contains("private video")
        || lower.contains("does not exist")
    {
        ExtractionError::Unavailable(message)
    } else if lower.contains("content too short") {
        ExtractionError::ContentTooShort(message)
    } else if lower.contains("timed out")
        || lower.contains("unable to download webpage")
        || lower.contains("http error")
        || lower.contains("connection")
    {
        ExtractionError::Network(message)
    } else {
        ExtractionError::Failed(message)
    }
}

/// Top-level JSON for `yt-dlp -J --flat-playlist`
#[derive(Debug, Deserialize)]
struct CollectionInfo {
    #[serde(default)]
    entries: Option<Vec<Option<EntryInfo>>>,
    #[serde(default)]
    webpage_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EntryInfo {
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl EntryInfo {
    fn locator(self) -> Option<String> {
        self.webpage_url.or(self.url)
    }
}

/// Top-level JSON for `yt-dlp -J --skip-download`
#[derive(Debug, Deserialize)]
struct VideoInfo {
    id: String,
    title: String,
    #[serde(default)]
    subtitles: Option<BTreeMap<String, serde_json::Value>>,
}

fn parse_collection(
    reference: &ContentReference,
    json: &str,
) -> Result<Vec<ContentReference>, ExtractionError> {
    let info: CollectionInfo =
        serde_json::from_str(json).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    let items: Vec<ContentReference> = match info.entries {
        Some(entries) => entries
            .into_iter()
            .flatten()
            .filter_map(EntryInfo::locator)
            .map(ContentReference::from)
            .collect(),
        // A single item expands to itself
        None => info
            .webpage_url
            .map(ContentReference::from)
            .into_iter()
            .collect(),
    };

    if items.is_empty() {
        return Err(ExtractionError::Empty(reference.to_string()));
    }

    Ok(items)
}

fn parse_metadata(json: &str) -> Result<ItemMetadata, ExtractionError> {
    let info: VideoInfo =
        serde_json::from_str(json).map_err(|e| ExtractionError::Parse(e.to_string()))?;

    Ok(ItemMetadata {
        id: info.id,
        title: info.title,
        subtitle_languages: info
            .subtitles
            .map(|subs| subs.into_keys().collect())
            .unwrap_or_default(),
    })
}

/// Parse the `after_move` print line: "<filepath>\t<title>"
fn parse_fetch_output(stdout: &str) -> Option<FetchedMedia> {
    let line = stdout.lines().rev().find(|l| !l.trim().is_empty())?;
    let (path, title) = line.split_once('\t')?;

    Some(FetchedMedia {
        local_path: Some(path.trim().into()),
        title: Some(title.trim().to_string()).filter(|t| !t.is_empty()),
    })
}

#[async_trait]
impl CollectionExpander for YtDlpAdapter {
    async fn expand(
        &self,
        reference: &ContentReference,
    ) -> Result<Vec<ContentReference>, ExtractionError> {
        let stdout = self
            .run(&["-J", "--flat-playlist", "--no-warnings", reference.as_str()])
            .await?;
        parse_collection(reference, &stdout)
    }
}

#[async_trait]
impl MetadataSource for YtDlpAdapter {
    async fn metadata(
        &self,
        reference: &ContentReference,
    ) -> Result<ItemMetadata, ExtractionError> {
        let stdout = self
            .run(&[
                "-J",
                "--skip-download",
                "--no-playlist",
                "--no-warnings",
                reference.as_str(),
            ])
            .await?;
        parse_metadata(&stdout)
    }
}

#[async_trait]
impl MediaFetcher for YtDlpAdapter {
    async fn fetch(
        &self,
        reference: &ContentReference,
        base_path: &Path,
        enabled: bool,
    ) -> Result<FetchedMedia> {
        if !enabled {
            return Ok(FetchedMedia::default());
        }

        tokio::fs::create_dir_all(base_path)
            .await
            .with_context(|| format!("Failed to create download directory: {}", base_path.display()))?;

        let template = base_path.join("%(id)s.%(ext)s");
        let template = template.to_string_lossy();
        let format = self.format_selector();

        let stdout = self
            .run(&[
                "-f",
                format.as_str(),
                "--merge-output-format",
                "mp4",
                "--restrict-filenames",
                "--continue",
                "--no-playlist",
                "--no-warnings",
                "--no-simulate",
                "-o",
                &*template,
                "--print",
                "after_move:%(filepath)s\t%(title)s",
                reference.as_str(),
            ])
            .await
            .with_context(|| format!("Failed to download {}", reference))?;

        parse_fetch_output(&stdout)
            .with_context(|| format!("yt-dlp reported no file for {}", reference))
    }
}
