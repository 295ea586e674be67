//! Stamp-checked storage of compiled artifacts.
//!
//! One [`DocCache`] is shared across a documentation session. Entries are
//! keyed by file identity and guarded by the modification stamp observed at
//! first write: a lookup whose live stamp no longer matches behaves as a
//! miss, and the next write recomputes the entry. There is no eviction; the
//! cache lives for the session.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::base::{FileKey, FsStamper, Stamp, Stamper};
use crate::compile::{CompilerConfig, Module};

// ============================================================================
// ENTRY
// ============================================================================

/// One cached artifact set for a file identity.
///
/// Every field is optional so the same type doubles as the patch handed to
/// [`DocCache::set`]; patches merge field-wise into the stored entry.
#[derive(Clone, Debug, Default)]
pub struct CacheEntry {
    /// Modification stamp observed when the entry was first written.
    /// `None` for identities with no live file behind them.
    pub stamp: Option<Stamp>,
    /// Raw source text the artifacts were built from.
    pub text: Option<Arc<str>>,
    /// Compiled module.
    pub module: Option<Arc<Module>>,
    /// Compiler configuration the module was built under.
    pub config: Option<CompilerConfig>,
}

impl CacheEntry {
    /// Patch carrying only source text.
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Patch carrying only a compiled module.
    pub fn with_module(mut self, module: Arc<Module>) -> Self {
        self.module = Some(module);
        self
    }

    /// Patch carrying only a compiler configuration.
    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Patch pinning an explicit stamp instead of probing the oracle.
    pub fn with_stamp(mut self, stamp: Stamp) -> Self {
        self.stamp = Some(stamp);
        self
    }

    fn merge(&mut self, patch: CacheEntry) {
        if patch.text.is_some() {
            self.text = patch.text;
        }
        if patch.module.is_some() {
            self.module = patch.module;
        }
        if patch.config.is_some() {
            self.config = patch.config;
        }
    }
}

// ============================================================================
// CACHE
// ============================================================================

/// Shared, stamp-checked artifact cache for one documentation session.
pub struct DocCache {
    store: RwLock<FxHashMap<FileKey, CacheEntry>>,
    stamper: Arc<dyn Stamper>,
}

impl Default for DocCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DocCache {
    /// Create a cache backed by the filesystem stamp oracle.
    pub fn new() -> Self {
        Self::with_stamper(Arc::new(FsStamper))
    }

    /// Create a cache backed by a custom stamp oracle.
    pub fn with_stamper(stamper: Arc<dyn Stamper>) -> Self {
        Self {
            store: RwLock::new(FxHashMap::default()),
            stamper,
        }
    }

    /// Probe the oracle for the current stamp of `key`.
    pub fn live_stamp(&self, key: &FileKey) -> Option<Stamp> {
        self.stamper.stamp(key)
    }

    /// Whether an entry is stored for `key`, fresh or not.
    pub fn has(&self, key: &FileKey) -> bool {
        self.store.read().contains_key(key)
    }

    /// Fetch the entry for `key`, provided its stored stamp still matches
    /// the live stamp. A stale or absent entry is a miss.
    pub fn get(&self, key: &FileKey) -> Option<CacheEntry> {
        let store = self.store.read();
        let entry = store.get(key)?;
        let live = self.stamper.stamp(key);
        if entry.stamp == live {
            trace!("[CACHE] hit for '{}'", key);
            Some(entry.clone())
        } else {
            debug!(
                "[CACHE] stale entry for '{}' (stored={:?}, live={:?})",
                key, entry.stamp, live
            );
            None
        }
    }

    /// Merge `patch` into the entry for `key`, creating it if needed, and
    /// return the stored result.
    ///
    /// The first write for an identity fixes its base stamp (the patch's
    /// stamp when pinned, the live stamp otherwise); later patches only
    /// augment the artifact fields.
    pub fn set(&self, key: &FileKey, patch: CacheEntry) -> CacheEntry {
        let mut store = self.store.write();
        let entry = store.entry(key.clone()).or_insert_with(|| {
            trace!("[CACHE] new entry for '{}'", key);
            CacheEntry::default()
        });
        if entry.stamp.is_none() {
            entry.stamp = patch.stamp.or_else(|| self.stamper.stamp(key));
        }
        entry.merge(patch);
        entry.clone()
    }

    /// Drop the entry for `key`, forcing the next lookup to miss.
    pub fn remove(&self, key: &FileKey) -> Option<CacheEntry> {
        debug!("[CACHE] removing entry for '{}'", key);
        self.store.write().remove(key)
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }
}
