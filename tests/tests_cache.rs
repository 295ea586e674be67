//! Artifact cache behaviors beyond the basic hit/miss cycle.

#[path = "helpers/mod.rs"]
mod helpers;

use std::fs;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use compdoc::base::{FileKey, Stamp};
use compdoc::cache::{CacheEntry, DocCache};
use compdoc::compile::CompilerConfig;

use helpers::fixtures::{FixedStamper, button_key, button_module, list_key};

#[test]
fn test_pinned_stamp_overrides_oracle_at_first_write() {
    let stamper = Arc::new(FixedStamper::new(Stamp::from_millis(10)));
    let cache = DocCache::with_stamper(stamper.clone());
    let key = button_key();

    cache.set(&key, CacheEntry::default().with_stamp(Stamp::from_millis(99)));
    assert!(cache.get(&key).is_none(), "pinned stamp disagrees with the oracle");
    assert!(cache.has(&key));

    // The entry validates once the file actually reaches the pinned stamp.
    stamper.set(Some(Stamp::from_millis(99)));
    let entry = cache.get(&key).expect("oracle caught up");
    assert_eq!(entry.stamp, Some(Stamp::from_millis(99)));
}

#[test]
fn test_set_returns_the_merged_entry() {
    let stamper = Arc::new(FixedStamper::new(Stamp::from_millis(10)));
    let cache = DocCache::with_stamper(stamper);
    let key = button_key();
    let module = Arc::new(button_module());

    let first = cache.set(&key, CacheEntry::default().with_text("source"));
    assert_eq!(first.stamp, Some(Stamp::from_millis(10)));
    assert_eq!(first.text.as_deref(), Some("source"));
    assert!(first.module.is_none());

    let second = cache.set(
        &key,
        CacheEntry::default()
            .with_module(module)
            .with_config(CompilerConfig::rooted("/workspace")),
    );
    assert_eq!(second.text.as_deref(), Some("source"));
    assert!(second.module.is_some());
    assert_eq!(second.config, Some(CompilerConfig::rooted("/workspace")));
}

#[test]
fn test_filesystem_stamps_guard_real_files() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("Button.comp");
    fs::write(&path, "source v1").expect("write");

    let cache = DocCache::new();
    let key = FileKey::from(path.as_path());
    assert!(cache.live_stamp(&key).is_some());

    cache.set(&key, CacheEntry::default().with_text("source v1"));
    assert!(cache.get(&key).is_some());

    // Push the modification time forward; the entry must stop validating.
    let file = fs::File::options().write(true).open(&path).expect("open");
    file.set_modified(SystemTime::now() + Duration::from_secs(10))
        .expect("set mtime");
    assert!(cache.get(&key).is_none());

    let missing = FileKey::from(dir.path().join("Gone.comp").as_path());
    assert!(cache.live_stamp(&missing).is_none());
}

#[test]
fn test_identities_are_tracked_independently() {
    let stamper = Arc::new(FixedStamper::new(Stamp::from_millis(10)));
    let cache = DocCache::with_stamper(stamper.clone());
    assert!(cache.is_empty());

    cache.set(&button_key(), CacheEntry::default().with_text("button"));
    cache.set(&list_key(), CacheEntry::default().with_text("list"));
    assert_eq!(cache.len(), 2);

    // Staleness is per identity; dropping one leaves the other alone.
    stamper.set(Some(Stamp::from_millis(20)));
    cache.remove(&button_key());
    assert_eq!(cache.len(), 1);
    assert!(cache.has(&list_key()));
    assert!(cache.get(&list_key()).is_none(), "survivor is stale, not gone");
}
