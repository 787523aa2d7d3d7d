//! Configuration for lessontree.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LESSONTREE_DATA_DIR, LESSONTREE_YTDLP)
//! 2. Config file (.lessontree/config.yaml)
//! 3. Defaults (./chefdata, yt-dlp from PATH, UCST channel)
//!
//! Config file discovery:
//! - Searches current directory and parents for .lessontree/config.yaml
//! - Paths in config file are relative to the project root (the parent of .lessontree/)
//!
//! Run flags (download, cache reuse) are not read from here; they are
//! passed per run as [`RunOptions`].

pub mod paths;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::ytdlp::DEFAULT_MAX_HEIGHT;
use crate::domain::{Authorship, License};

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub channel: Option<ChannelConfig>,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub ytdlp: Option<YtDlpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Data directory (relative to project root)
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YtDlpConfig {
    pub binary: Option<String>,
    pub max_height: Option<u32>,
}

/// Channel identity written at the root of the tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub name: String,
    pub source_id: String,
    pub domain: String,
    pub language: String,
    pub description: String,
    pub thumbnail: String,
    pub author: String,
    pub copyright_holder: String,
    pub license_id: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: "University College of Science and Technology's E-learning Unit (العربيّة)"
                .to_string(),
            source_id: "ucst-elearning".to_string(),
            domain: "https://www.youtube.com/user/CoursesTube/".to_string(),
            language: "ar".to_string(),
            description: "تقدم قناة مركز التعليم الإلكتروني في الكلية الجامعية للعلوم والتكنولوجيا مجموعة من الدروس الفعالة والمفيدة لطلاب المرحلة الجامعية في عديد من التخصصات مثل العلوم الطبية والهندسة والبرمجيات وعلوم الحاسوب. كما أنها تحوي مجموعة من الدروس المقدمة لطلبة المرحلة الثانوية في البرمجة.".to_string(),
            thumbnail: "https://yt3.ggpht.com/a-/AAuE7mAONlA6e6c5gpmCuxIUvfk3-IegnkU8xXb35w=s288-mo-c-c0xffffffff-rj-k-no".to_string(),
            author: "University College of Science and Technology".to_string(),
            copyright_holder: "University College of Science and Technology".to_string(),
            license_id: "CC BY".to_string(),
        }
    }
}

impl ChannelConfig {
    /// Author and license stamped on every record
    pub fn authorship(&self) -> Authorship {
        Authorship {
            author: self.author.clone(),
            license: License::new(&self.license_id, &self.copyright_holder),
        }
    }
}

/// Flags for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Download media payloads (nodes without a payload are left out of the tree)
    pub download: bool,

    /// Read resolved collections from the cache instead of re-resolving
    pub reuse_cache: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            download: true,
            reuse_cache: false,
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Data directory (cache, downloads, trees)
    pub data_dir: PathBuf,
    /// Channel identity
    pub channel: ChannelConfig,
    /// yt-dlp binary
    pub ytdlp_binary: String,
    /// Maximum video height for downloads
    pub max_height: u32,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let config_file = find_config_file(&cwd);

        let file = match config_file {
            Some(ref path) => Some(load_config_file(path)?),
            None => None,
        };

        Ok(resolve(
            file,
            config_file,
            &cwd,
            std::env::var("LESSONTREE_DATA_DIR").ok(),
            std::env::var("LESSONTREE_YTDLP").ok(),
        ))
    }

    /// Directory holding cached playlist resolutions
    pub fn playlist_cache_dir(&self) -> PathBuf {
        paths::playlist_cache_dir(&self.data_dir, &self.channel.source_id)
    }
}

/// Find config file by searching a directory and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".lessontree").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Merge file, environment and defaults
fn resolve(
    file: Option<ConfigFile>,
    config_file: Option<PathBuf>,
    cwd: &Path,
    env_data_dir: Option<String>,
    env_ytdlp: Option<String>,
) -> ResolvedConfig {
    // Base directory is the parent of .lessontree/ (i.e., grandparent of config.yaml)
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .unwrap_or(cwd);

    let (channel, data_dir, ytdlp) = match file {
        Some(file) => (file.channel, file.paths.data_dir, file.ytdlp),
        None => (None, None, None),
    };

    let data_dir = match (env_data_dir, data_dir) {
        (Some(env), _) => PathBuf::from(env),
        (None, Some(dir)) => resolve_path(base_dir, &dir),
        (None, None) => cwd.join(paths::DEFAULT_DATA_DIR),
    };

    let ytdlp_binary = env_ytdlp
        .or_else(|| ytdlp.as_ref().and_then(|y| y.binary.clone()))
        .unwrap_or_else(|| "yt-dlp".to_string());

    let max_height = ytdlp
        .as_ref()
        .and_then(|y| y.max_height)
        .unwrap_or(DEFAULT_MAX_HEIGHT);

    ResolvedConfig {
        data_dir,
        channel: channel.unwrap_or_default(),
        ytdlp_binary,
        max_height,
        config_file,
    }
}
