//! Component compiler seam.
//!
//! Turning component source text into a typed [`Module`] is an external
//! concern; this crate only defines the contract. [`ComponentCompiler`] is
//! the seam, [`CompilerConfig`] the resolved per-run settings, and
//! [`StaticCompiler`] a preloaded-module implementation for embedding and
//! tests.

use std::path::PathBuf;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::base::FileKey;
use crate::error::DocError;

mod module;

pub use module::{
    ENTRY_FUNCTION, ExprRef, FunctionBody, Module, PatternBinding, PropsPattern, Statement,
    VarDecl,
};

// ============================================================================
// CONFIG
// ============================================================================

/// Resolved compiler settings for one documentation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Workspace root used to resolve relative file keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Treat sources without an explicit mode marker as legacy.
    #[serde(default)]
    pub assume_legacy: bool,
}

impl CompilerConfig {
    /// Create a config rooted at `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// COMPILER SEAM
// ============================================================================

/// Compiles component source text into a typed intermediate [`Module`].
///
/// Implementations own parsing and type resolution end to end. The module
/// they return must expose exactly one entry function whose return type's
/// own properties are drawn from `props`, `bindings`, `slots`, `exports`,
/// and `events`.
pub trait ComponentCompiler: Send + Sync {
    /// Compile `source`, known to the session under `key`.
    fn compile(
        &self,
        source: &str,
        key: &FileKey,
        config: &CompilerConfig,
    ) -> Result<Module, DocError>;
}

/// A compiler serving preloaded modules by file identity.
///
/// Useful for embedding hosts that compile elsewhere and for tests; it
/// never looks at the source text.
#[derive(Debug, Default)]
pub struct StaticCompiler {
    modules: FxHashMap<FileKey, Module>,
}

impl StaticCompiler {
    /// Create an empty compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under its own file identity.
    pub fn insert(&mut self, module: Module) {
        self.modules.insert(module.file.clone(), module);
    }

    /// Builder-style [`StaticCompiler::insert`].
    pub fn with_module(mut self, module: Module) -> Self {
        self.insert(module);
        self
    }
}

impl ComponentCompiler for StaticCompiler {
    fn compile(
        &self,
        _source: &str,
        key: &FileKey,
        _config: &CompilerConfig,
    ) -> Result<Module, DocError> {
        self.modules
            .get(key)
            .cloned()
            .ok_or_else(|| DocError::compile(format!("no module registered for `{key}`")))
    }
}
