//! The documentation engine.
//!
//! [`Docgen`] owns the moving parts and keeps them consistent: a
//! [`ComponentCompiler`] producing typed modules, the [`DocCache`] that
//! makes repeat documentation of unchanged files cheap, and the compiler
//! configuration every compile runs under. [`Docgen::document`] produces
//! one component surface; [`Docgen::document_all`] fans a batch out across
//! the rayon pool.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = Docgen::new(compiler);
//!
//! let docs = engine.document(&source, &key)?;
//! let payload = codec::encode(&docs, &EncodeOptions::new())?;
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::base::FileKey;
use crate::cache::{CacheEntry, DocCache};
use crate::compile::{CompilerConfig, ComponentCompiler};
use crate::error::DocError;
use crate::extract::{ComponentDocs, extract_docs};

/// Ties compiler, cache, and extractor together for a documentation session.
pub struct Docgen {
    compiler: Arc<dyn ComponentCompiler>,
    cache: Arc<DocCache>,
    config: CompilerConfig,
}

impl Docgen {
    /// Create an engine around `compiler` with a fresh filesystem-stamped
    /// cache and default configuration.
    pub fn new(compiler: Arc<dyn ComponentCompiler>) -> Self {
        Self {
            compiler,
            cache: Arc::new(DocCache::new()),
            config: CompilerConfig::default(),
        }
    }

    /// Share an existing cache, typically one with a custom stamp oracle.
    pub fn with_cache(mut self, cache: Arc<DocCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Run every compile under `config`.
    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// The cache this engine consults.
    pub fn cache(&self) -> &Arc<DocCache> {
        &self.cache
    }

    /// Document one component from its source text.
    ///
    /// A cached module is reused only while the stamp oracle positively
    /// vouches for it. A stale entry, or one whose identity yields no
    /// live stamp at all, is dropped before the fresh compile so the
    /// replacement write stamps at the current modification time.
    pub fn document(&self, source: &str, key: &FileKey) -> Result<ComponentDocs, DocError> {
        let cached = match self.cache.live_stamp(key) {
            Some(_) => self.cache.get(key),
            None => None,
        };
        if cached.is_none() && self.cache.has(key) {
            debug!("[DOC] dropping invalidated cache entry for '{}'", key);
            self.cache.remove(key);
        }

        let module = match cached.and_then(|entry| entry.module) {
            Some(module) => {
                debug!("[DOC] reusing cached module for '{}'", key);
                module
            }
            None => {
                let module = Arc::new(self.compiler.compile(source, key, &self.config)?);
                self.cache.set(
                    key,
                    CacheEntry::default()
                        .with_text(source)
                        .with_module(Arc::clone(&module))
                        .with_config(self.config.clone()),
                );
                module
            }
        };

        extract_docs(&module)
    }

    /// Document a batch of components across the thread pool.
    ///
    /// Failures are reported per file; one component failing to compile
    /// does not abort its siblings.
    pub fn document_all(
        &self,
        sources: &[(FileKey, String)],
    ) -> Vec<(FileKey, Result<ComponentDocs, DocError>)> {
        sources
            .par_iter()
            .map(|(key, source)| (key.clone(), self.document(source, key)))
            .collect()
    }
}
