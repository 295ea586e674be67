//! # compdoc-base
//!
//! Core library for component surface extraction, type documentation,
//! and incremental doc caching.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! docgen    → Documentation engine (compiler + cache + extractor)
//!   ↓
//! codec     → JSON payload encode/decode, key projection
//!   ↓
//! analyze   → Consumer-facing predicates over finished doc trees
//!   ↓
//! extract   → Component surface extraction (props, exports, events, slots)
//!   ↓
//! doc       → Documentation tree, recursive type documenter
//!   ↓
//! cache     → Stamp-validated artifact cache
//!   ↓
//! compile   → Compiler seam, typed module IR, compiler config
//!   ↓
//! sema      → Semantic type table (flags, type data, symbols)
//!   ↓
//! base      → Primitives (FileKey, Stamp, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → sema → compile → cache → doc → extract)
// ============================================================================

/// Foundation types: FileKey, Stamp, stamp oracles, TextRange
pub mod base;

/// Semantic model: type flags, type table, symbols, signatures
pub mod sema;

/// Compiler seam: ComponentCompiler trait, typed module IR, config
pub mod compile;

/// Incremental cache keyed by file identity and modification stamp
pub mod cache;

/// Documentation tree and the recursive type documenter
pub mod doc;

/// Surface extraction: props, bindings, exports, events, slots
pub mod extract;

/// JSON payload codec with key projection and permissive decode
pub mod codec;

/// Stateless analyzers over finished documentation trees
pub mod analyze;

/// Documentation engine tying compiler, cache, and extractor together
pub mod docgen;

/// Error taxonomy shared across the crate
pub mod error;

// Re-export the engine and its collaborators
pub use cache::{CacheEntry, DocCache};
pub use docgen::Docgen;

// Re-export foundation types
pub use base::{FileKey, FsStamper, Stamp, Stamper, TextRange, TextSize};
pub use error::{DocError, ErrorCategory};
