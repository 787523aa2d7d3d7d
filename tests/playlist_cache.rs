//! Playlist Cache Integration Tests
//!
//! Resolution memoization across resolver instances (i.e. across runs).

mod common;

use std::path::Path;
use std::sync::Arc;

use common::FakeSource;
use lessontree::config::paths;
use lessontree::core::{PlaylistCache, PlaylistResolver, ResolvedItem};
use lessontree::domain::ContentReference;
use tempfile::TempDir;

const PLAYLIST: &str = "https://www.youtube.com/playlist?list=X";

fn resolver(
    source: FakeSource,
    cache_dir: &Path,
    reuse_cache: bool,
) -> (Arc<FakeSource>, PlaylistResolver) {
    let (source, collaborators) = source.into_collaborators();
    let resolver = PlaylistResolver::new(
        collaborators.expander,
        collaborators.metadata,
        PlaylistCache::new(cache_dir),
        reuse_cache,
    );
    (source, resolver)
}

#[tokio::test]
async fn test_second_run_reads_cache() {
    let temp = TempDir::new().unwrap();
    let cache_dir = paths::playlist_cache_dir(temp.path(), "test-channel");

    let (first_source, first) = resolver(
        FakeSource::new().collection(PLAYLIST, &[("A", "u1"), ("B", "u2")]),
        &cache_dir,
        true,
    );
    let reference = ContentReference::new(PLAYLIST);
    let fresh = first.try_resolve(&reference).await.unwrap();
    assert!(!fresh.from_cache);
    assert_eq!(first_source.expand_count(), 1);

    // A new resolver over the same directory never reaches the expander
    let (second_source, second) = resolver(FakeSource::new().failing(PLAYLIST), &cache_dir, true);
    let cached = second.try_resolve(&reference).await.unwrap();

    assert!(cached.from_cache);
    assert_eq!(cached.items, fresh.items);
    assert_eq!(
        cached.items,
        vec![ResolvedItem::new("A", "u1"), ResolvedItem::new("B", "u2")]
    );
    assert_eq!(second_source.expand_count(), 0);
}

#[tokio::test]
async fn test_equivalent_references_share_an_entry() {
    let temp = TempDir::new().unwrap();

    let (source, resolver) = resolver(
        FakeSource::new().collection(PLAYLIST, &[("A", "u1")]),
        temp.path(),
        true,
    );

    resolver
        .try_resolve(&ContentReference::new(PLAYLIST))
        .await
        .unwrap();
    let again = resolver
        .try_resolve(&ContentReference::new(&format!("  {}/ ", PLAYLIST)))
        .await
        .unwrap();

    assert!(again.from_cache);
    assert_eq!(source.expand_count(), 1);
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_reuse_disabled_refreshes_entry() {
    let temp = TempDir::new().unwrap();
    let reference = ContentReference::new(PLAYLIST);

    let (_, stale) = resolver(
        FakeSource::new().collection(PLAYLIST, &[("Old", "u0")]),
        temp.path(),
        false,
    );
    stale.try_resolve(&reference).await.unwrap();

    let (source, fresh) = resolver(
        FakeSource::new().collection(PLAYLIST, &[("New", "u9")]),
        temp.path(),
        false,
    );
    let resolution = fresh.try_resolve(&reference).await.unwrap();
    assert_eq!(resolution.items, vec![ResolvedItem::new("New", "u9")]);
    assert_eq!(source.expand_count(), 1);

    let cached = fresh
        .cache()
        .load(&reference.content_hash())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached, vec![ResolvedItem::new("New", "u9")]);
}

#[tokio::test]
async fn test_failed_resolution_is_not_cached() {
    let temp = TempDir::new().unwrap();
    let reference = ContentReference::new(PLAYLIST);

    let (_, resolver) = resolver(FakeSource::new().failing(PLAYLIST), temp.path(), true);
    assert!(resolver.resolve(&reference).await.is_empty());
    assert!(!resolver.cache().entry_path(&reference.content_hash()).exists());
}
