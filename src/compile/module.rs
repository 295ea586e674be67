//! Compiled intermediate module model.
//!
//! The component compiler lowers a component source file into a [`Module`]:
//! the semantic [`TypeTable`] for the file, the top-level declaration
//! symbols (the synthesized entry function among them), and the structural
//! facts the extractor reads back out of the entry function body.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileKey, TextRange};
use crate::sema::{SymbolId, Tag, TypeId, TypeTable};

/// Name of the synthesized entry function every compiled component exposes.
pub const ENTRY_FUNCTION: &str = "render";

// ============================================================================
// ENTRY FUNCTION BODY
// ============================================================================

/// A typed reference into the compiled intermediate text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExprRef {
    /// Resolved type of the expression.
    pub ty: TypeId,
    /// Byte range of the expression in [`Module::text`].
    pub range: TextRange,
}

impl ExprRef {
    /// Create an expression reference.
    pub fn new(ty: TypeId, range: TextRange) -> Self {
        Self { ty, range }
    }
}

/// One binding inside the destructured-properties pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBinding {
    /// Property name the binding destructures.
    pub name: SmolStr,
    /// Default-value initializer, when the binding declares one.
    pub init: Option<ExprRef>,
}

/// The destructured-properties pattern of a modern component.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropsPattern {
    /// Bindings in source order.
    pub bindings: Vec<PatternBinding>,
}

/// A top-level variable declaration in the entry function body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDecl {
    /// Declared name.
    pub name: SmolStr,
    /// Reactive declarations never contribute property defaults.
    pub reactive: bool,
    /// Initializer, when present.
    pub init: Option<ExprRef>,
}

/// A statement in the entry function body.
///
/// Only the statement shapes the extractor cares about are modeled; the
/// compiler collapses everything else into [`Statement::Expr`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// A variable declaration.
    Var(VarDecl),
    /// Any other expression statement.
    Expr(ExprRef),
}

/// Structural facts about the entry function body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionBody {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
    /// Destructured-properties pattern, when the source declares one.
    pub props_pattern: Option<PropsPattern>,
}

// ============================================================================
// MODULE
// ============================================================================

/// A compiled component module.
#[derive(Clone, Debug)]
pub struct Module {
    /// Identity of the compiled file.
    pub file: FileKey,
    /// Whether the source used the legacy declaration style.
    pub legacy_declaration: bool,
    /// Top-level declaration symbols, the entry function among them.
    pub symbols: Vec<SymbolId>,
    /// Entry function body facts.
    pub body: FunctionBody,
    /// Component-level doc-comment description.
    pub description: Option<String>,
    /// Component-level doc-comment tags.
    pub tags: Vec<Tag>,
    /// Compiled intermediate text that [`ExprRef`] ranges index into.
    pub text: Arc<str>,
    /// Semantic type graph for this module.
    pub table: TypeTable,
}

impl Module {
    /// Create an empty module for `file` over `table`.
    pub fn new(file: FileKey, table: TypeTable) -> Self {
        Self {
            file,
            legacy_declaration: false,
            symbols: Vec::new(),
            body: FunctionBody::default(),
            description: None,
            tags: Vec::new(),
            text: Arc::from(""),
            table,
        }
    }

    /// Find a top-level declaration symbol by name.
    pub fn symbol_named(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .copied()
            .find(|sym| self.table.symbol(*sym).name == name)
    }

    /// Find the synthesized entry function symbol.
    pub fn entry_symbol(&self) -> Option<SymbolId> {
        self.symbol_named(ENTRY_FUNCTION)
    }
}
