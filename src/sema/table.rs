//! Semantic type table.
//!
//! [`TypeTable`] is the crate's model of the host type-checking service: an
//! arena of type and symbol records plus the query surface the extractor and
//! the documenter drive. Component compilers populate one table per module;
//! this crate only ever reads it back.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::sema::{ObjectFlags, TypeFlags};

/// Symbol name the host assigns to inline type literals.
///
/// A type whose only naming symbol carries this name is treated as unaliased.
pub const ANONYMOUS_SYMBOL: &str = "__type";

// ============================================================================
// IDS
// ============================================================================

/// Identifier of a type record in a [`TypeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Arena index of this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identifier of a symbol record in a [`TypeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Arena index of this id.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// A doc-comment tag attached to a symbol, like `@deprecated` or `@since`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name without the leading `@`.
    pub name: SmolStr,
    /// Free-form text following the tag name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Tag {
    /// Create a tag with no content.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            content: None,
        }
    }

    /// Create a tag with content.
    pub fn with_content(name: impl Into<SmolStr>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Some(content.into()),
        }
    }
}

/// Concrete value carried by a literal type.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    String(SmolStr),
    Number(f64),
    Boolean(bool),
    /// Sign and base-10 magnitude as the host reports them.
    BigInt { negative: bool, base10: SmolStr },
}

/// A numeric index signature on an object type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexInfo {
    /// Type of the indexed elements.
    pub value_type: TypeId,
    /// Readonly marker on the signature.
    pub is_readonly: bool,
}

/// A call or construct signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// Parameter symbols in declaration order.
    pub parameters: Vec<SymbolId>,
    /// Resolved return type.
    pub return_type: TypeId,
}

impl Signature {
    /// Create a signature.
    pub fn new(parameters: Vec<SymbolId>, return_type: TypeId) -> Self {
        Self {
            parameters,
            return_type,
        }
    }
}

/// One semantic type record.
///
/// Fields are populated per kind; the classifier decides which ones matter
/// for a given record. Unused fields stay at their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeData {
    /// Primitive classification bits.
    pub flags: TypeFlags,
    /// Object sub-classification bits.
    pub object_flags: ObjectFlags,
    /// Declaring symbol, when the type has one.
    pub symbol: Option<SymbolId>,
    /// Alias symbol, when the type was reached through a type alias.
    pub alias: Option<SymbolId>,
    /// Own properties in declaration order.
    pub properties: Vec<SymbolId>,
    /// Call signatures.
    pub call_signatures: Vec<Signature>,
    /// Construct signatures.
    pub construct_signatures: Vec<Signature>,
    /// Numeric index signature, when the type has one.
    pub index_info: Option<IndexInfo>,
    /// Generic instantiation target (tuple references point at the tuple
    /// shape through this).
    pub target: Option<TypeId>,
    /// Resolved type arguments of a generic reference, in declared order.
    pub type_args: Vec<TypeId>,
    /// Union or intersection members in declared order.
    pub members: Vec<TypeId>,
    /// Literal payload for literal-flagged types.
    pub literal: Option<LiteralValue>,
    /// Constraint of a type parameter.
    pub constraint: Option<TypeId>,
    /// Default of a type parameter.
    pub default: Option<TypeId>,
    /// `const` modifier on a type parameter.
    pub is_const: bool,
    /// Readonly marker on tuple target shapes.
    pub readonly: bool,
    /// Precomputed non-nullable projection for unions, when it differs
    /// from the union itself.
    pub non_nullable: Option<TypeId>,
}

/// One symbol record: a named declaration with a type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolData {
    /// Declared name.
    pub name: SmolStr,
    /// Fully-qualified name, when the declaration is importable.
    pub qualified: Option<SmolStr>,
    /// Declared type.
    pub ty: Option<TypeId>,
    /// Optionality marker (`?` on members and parameters).
    pub optional: bool,
    /// Readonly modifier.
    pub readonly: bool,
    /// Initializer type for parameter symbols with a default value.
    pub default_ty: Option<TypeId>,
    /// Declaring file locations.
    pub sources: Vec<SmolStr>,
    /// Parsed doc-comment description.
    pub description: Option<String>,
    /// Parsed doc-comment tags.
    pub tags: Vec<Tag>,
}

impl SymbolData {
    /// Create a symbol with a name and a declared type.
    pub fn new(name: impl Into<SmolStr>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            ..Default::default()
        }
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Arena of type and symbol records for one compiled module.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    types: Vec<TypeData>,
    symbols: Vec<SymbolData>,
    /// Interned builtin ids, keyed by flag word.
    builtins: IndexMap<u32, TypeId>,
}

impl TypeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of type records.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of symbol records.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Add a type record, returning its id.
    pub fn add_type(&mut self, data: TypeData) -> TypeId {
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(data);
        id
    }

    /// Add a symbol record, returning its id.
    pub fn add_symbol(&mut self, data: SymbolData) -> SymbolId {
        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(data);
        id
    }

    /// Intern a builtin type carrying exactly `flags` and nothing else.
    ///
    /// Repeated calls with the same flag word return the same id.
    pub fn intern_builtin(&mut self, flags: TypeFlags) -> TypeId {
        if let Some(id) = self.builtins.get(&flags.0) {
            return *id;
        }
        let id = self.add_type(TypeData {
            flags,
            ..Default::default()
        });
        self.builtins.insert(flags.0, id);
        id
    }

    /// Add a union over `members`, eagerly computing its non-nullable
    /// projection.
    ///
    /// The projection is the union with `null`/`undefined` members removed:
    /// absent when nothing was removed, the lone surviving member when one
    /// remains, `never` when nothing survives, and a fresh union otherwise.
    pub fn add_union(&mut self, members: Vec<TypeId>) -> TypeId {
        let retained: Vec<TypeId> = members
            .iter()
            .copied()
            .filter(|id| !self.type_data(*id).flags.intersects(TypeFlags::NULLABLE))
            .collect();

        let non_nullable = if retained.len() == members.len() {
            None
        } else if retained.is_empty() {
            Some(self.intern_builtin(TypeFlags::NEVER))
        } else if retained.len() == 1 {
            Some(retained[0])
        } else {
            Some(self.add_type(TypeData {
                flags: TypeFlags::UNION,
                members: retained,
                ..Default::default()
            }))
        };

        self.add_type(TypeData {
            flags: TypeFlags::UNION,
            members,
            non_nullable,
            ..Default::default()
        })
    }

    /// Mutable access to a type record, for fix-ups after insertion.
    pub fn type_data_mut(&mut self, id: TypeId) -> &mut TypeData {
        &mut self.types[id.index()]
    }

    /// Mutable access to a symbol record.
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut SymbolData {
        &mut self.symbols[id.index()]
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Read a type record.
    pub fn type_data(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    /// Read a symbol record.
    pub fn symbol(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id.index()]
    }

    /// Own properties of a type, in declaration order.
    pub fn properties_of(&self, id: TypeId) -> &[SymbolId] {
        &self.type_data(id).properties
    }

    /// Find an own property by name.
    pub fn property(&self, id: TypeId, name: &str) -> Option<SymbolId> {
        self.properties_of(id)
            .iter()
            .copied()
            .find(|sym| self.symbol(*sym).name == name)
    }

    /// Call signatures of a type.
    pub fn call_signatures(&self, id: TypeId) -> &[Signature] {
        &self.type_data(id).call_signatures
    }

    /// Construct signatures of a type.
    pub fn construct_signatures(&self, id: TypeId) -> &[Signature] {
        &self.type_data(id).construct_signatures
    }

    /// Non-nullable projection of a union; the type itself when nothing
    /// nullable was removed.
    pub fn non_nullable(&self, id: TypeId) -> TypeId {
        self.type_data(id).non_nullable.unwrap_or(id)
    }

    /// Fully-qualified name of a symbol, falling back to the plain name.
    pub fn qualified_of(&self, sym: SymbolId) -> SmolStr {
        let data = self.symbol(sym);
        data.qualified.clone().unwrap_or_else(|| data.name.clone())
    }

    /// Symbol naming a type for alias purposes: the alias symbol when it
    /// carries a real name, else the declaring symbol, else nothing.
    /// The anonymous `__type` marker never counts as a name.
    pub fn naming_symbol(&self, id: TypeId) -> Option<SymbolId> {
        let data = self.type_data(id);
        [data.alias, data.symbol]
            .into_iter()
            .flatten()
            .find(|sym| self.symbol(*sym).name != ANONYMOUS_SYMBOL)
    }

    /// Symbol naming a constructible type: the declaring symbol when it
    /// carries a real name, else the alias symbol.
    pub fn declaring_symbol(&self, id: TypeId) -> Option<SymbolId> {
        let data = self.type_data(id);
        [data.symbol, data.alias]
            .into_iter()
            .flatten()
            .find(|sym| self.symbol(*sym).name != ANONYMOUS_SYMBOL)
    }
}
