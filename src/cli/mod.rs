//! Command-line interface for lessontree.
//!
//! Provides commands for building the content tree from a curriculum file,
//! resolving a single collection, and showing the resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::adapters::{Collaborators, YtDlpAdapter};
use crate::config::{paths, ResolvedConfig, RunOptions};
use crate::core::{write_tree, PlaylistCache, PlaylistResolver, TreeBuilder};
use crate::curriculum::Curriculum;
use crate::domain::ContentReference;

/// lessontree - build a content tree from a grade/subject/playlist curriculum
#[derive(Parser, Debug)]
#[command(name = "lessontree")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the content tree
    Build {
        /// Curriculum file (JSON list of grades)
        #[arg(default_value = "resources.json")]
        curriculum: PathBuf,

        /// Skip media downloads (items without a payload are left out of the tree)
        #[arg(long)]
        no_download: bool,

        /// Reuse cached playlist resolutions from earlier runs
        #[arg(long, env = "LESSONTREE_REUSE_CACHE")]
        reuse_cache: bool,

        /// Output path for the tree (default: <data_dir>/trees/ricecooker_json_tree.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve one collection and print its items
    Resolve {
        /// Collection reference (playlist URL)
        reference: String,

        /// Reuse a cached resolution if present
        #[arg(long)]
        reuse_cache: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = ResolvedConfig::load()?;

        match self.command {
            Commands::Build {
                curriculum,
                no_download,
                reuse_cache,
                output,
            } => {
                let options = RunOptions {
                    download: !no_download,
                    reuse_cache,
                };
                build(&config, &curriculum, options, output).await
            }
            Commands::Resolve {
                reference,
                reuse_cache,
            } => resolve(&config, &reference, reuse_cache).await,
            Commands::Config => {
                show_config(&config);
                Ok(())
            }
        }
    }
}

fn collaborators(config: &ResolvedConfig) -> Collaborators {
    Collaborators::from_adapter(
        YtDlpAdapter::with_binary_path(&config.ytdlp_binary).with_max_height(config.max_height),
    )
}

/// Build the tree and write it with its run report
async fn build(
    config: &ResolvedConfig,
    curriculum_path: &Path,
    options: RunOptions,
    output: Option<PathBuf>,
) -> Result<()> {
    let curriculum = Curriculum::load(curriculum_path)?;
    eprintln!(
        "Building {} grade(s) from {}",
        curriculum.len(),
        curriculum_path.display()
    );

    let builder = TreeBuilder::new(
        config.channel.clone(),
        options,
        collaborators(config),
        PlaylistCache::new(config.playlist_cache_dir()),
        paths::download_dir(&config.data_dir),
    );
    let out = builder.run(&curriculum).await?;

    let tree_path = output.unwrap_or_else(|| paths::tree_file(&config.data_dir));
    write_tree(&out.tree, &tree_path).await?;

    let report_path = paths::report_file(&config.data_dir);
    out.report.save(&report_path).await?;

    eprintln!("\nTree written to {}", tree_path.display());
    eprintln!("   Run: {}", out.report.run_id);
    eprintln!(
        "   References: {} resolved, {} skipped, {} failed",
        out.report.resolved(),
        out.report.skipped(),
        out.report.failed()
    );
    eprintln!(
        "   Media: {} rendered, {} without payload",
        out.report.media_rendered, out.report.media_absent
    );
    eprintln!("   Report: {}", report_path.display());

    Ok(())
}

/// Resolve one collection and print the ordered items
async fn resolve(config: &ResolvedConfig, raw: &str, reuse_cache: bool) -> Result<()> {
    let backends = collaborators(config);
    let resolver = PlaylistResolver::new(
        backends.expander,
        backends.metadata,
        PlaylistCache::new(config.playlist_cache_dir()),
        reuse_cache,
    );

    let reference = ContentReference::new(raw);
    let resolution = resolver.try_resolve(&reference).await?;

    println!("{:<4} {:<50} {}", "#", "TITLE", "REFERENCE");
    println!("{}", "-".repeat(100));
    for (i, item) in resolution.items.iter().enumerate() {
        println!("{:<4} {:<50} {}", i + 1, truncate(&item.title, 47), item.reference);
    }

    eprintln!(
        "\n{} item(s){}",
        resolution.items.len(),
        if resolution.from_cache { " (cached)" } else { "" }
    );
    eprintln!(
        "Cache entry: {}",
        resolver
            .cache()
            .entry_path(&reference.content_hash())
            .display()
    );

    Ok(())
}

/// Truncate a title for table display, on a character boundary
fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        format!("{}...", title.chars().take(max).collect::<String>())
    } else {
        title.to_string()
    }
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) {
    println!("Lessontree Configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Data:           {}", cfg.data_dir.display());
    println!("  Playlist cache: {}", cfg.playlist_cache_dir().display());
    println!("  Downloads:      {}", paths::download_dir(&cfg.data_dir).display());
    println!("  Tree:           {}", paths::tree_file(&cfg.data_dir).display());
    println!();
    println!("yt-dlp:");
    println!("  Binary:     {}", cfg.ytdlp_binary);
    println!("  Max height: {}", cfg.max_height);
    println!();
    println!("Channel:");
    println!("  Name:      {}", cfg.channel.name);
    println!("  Source ID: {}", cfg.channel.source_id);
    println!("  Language:  {}", cfg.channel.language);
    println!("  License:   {}", cfg.channel.license_id);
}
