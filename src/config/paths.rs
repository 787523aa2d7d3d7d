//! Canonical paths under the data directory.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! ```text
//! chefdata/
//! ├── <channel_source_id>/        # playlist cache, one <sha256>.json per collection
//! ├── <video_id>.mp4              # downloaded payloads
//! └── trees/
//!     ├── ricecooker_json_tree.json
//!     └── run_report.json
//! ```

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "chefdata";

/// File name of the serialized tree
pub const TREE_FILE_NAME: &str = "ricecooker_json_tree.json";

/// File name of the run report
pub const REPORT_FILE_NAME: &str = "run_report.json";

/// Playlist cache directory for a channel
pub fn playlist_cache_dir(data_dir: &Path, channel_source_id: &str) -> PathBuf {
    data_dir.join(channel_source_id)
}

/// Base directory for downloaded payloads
pub fn download_dir(data_dir: &Path) -> PathBuf {
    data_dir.to_path_buf()
}

/// Directory holding serialized trees
pub fn trees_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("trees")
}

/// Default output path of the serialized tree
pub fn tree_file(data_dir: &Path) -> PathBuf {
    trees_dir(data_dir).join(TREE_FILE_NAME)
}

/// Output path of the run report
pub fn report_file(data_dir: &Path) -> PathBuf {
    trees_dir(data_dir).join(REPORT_FILE_NAME)
}
