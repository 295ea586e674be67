//! Recursive type documentation builder.
//!
//! [`document_type`] converts one semantic type into its [`TypeDoc`]. A
//! kind classifier runs first, in a fixed priority order over the flag
//! words; per-kind builders then read the payload fields that kind
//! requires. A payload that does not match its kind is an internal
//! inconsistency between compiler and documenter and fails the build.
//!
//! Self-referential graphs terminate through an in-progress name stack.
//! Constructibles and aliased callables hold their resolved names on the
//! stack while expanding; meeting a held name again short-circuits to the
//! `"self"` sentinel instead of recursing, at the constructor list for
//! constructibles and at the parameter position for callables.

use smol_str::SmolStr;
use tracing::trace;

use crate::doc::maps::{OrderedMap, SourceSet};
use crate::doc::tree::{
    ArrayDoc, CallSignature, ConstructibleDoc, Constructors, FunctionDoc, InterfaceDoc,
    IntersectionDoc, LiteralDoc, Member, ParamDoc, SignatureParam, TupleDoc, TypeDoc,
    TypeParamDoc, UnionDoc,
};
use crate::error::DocError;
use crate::sema::{LiteralValue, ObjectFlags, SymbolId, TypeData, TypeFlags, TypeId, TypeTable};

// ============================================================================
// KIND CLASSIFIER
// ============================================================================

/// Final dispatch target for one semantic type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypeKind {
    Any,
    Never,
    Null,
    Undefined,
    Unknown,
    Void,
    BigintLiteral,
    BooleanLiteral,
    NumberLiteral,
    StringLiteral,
    SymbolLiteral,
    Bigint,
    Boolean,
    Number,
    String,
    Symbol,
    Tuple,
    Intersection,
    Union,
    Array,
    Interface,
    Function,
    Constructible,
    TypeParameter,
    Object,
}

fn is_tuple_reference(table: &TypeTable, data: &TypeData) -> bool {
    data.flags.intersects(TypeFlags::OBJECT)
        && data.object_flags.intersects(ObjectFlags::REFERENCE)
        && data
            .target
            .is_some_and(|t| table.type_data(t).object_flags.intersects(ObjectFlags::TUPLE))
}

fn is_array_reference(data: &TypeData) -> bool {
    data.flags.intersects(TypeFlags::OBJECT)
        && data.object_flags.intersects(ObjectFlags::REFERENCE)
        && data.index_info.is_some()
}

/// Classify a type into its documentation kind.
///
/// Checks run cheapest first; literal flags take priority over the loose
/// primitives, tuples over arrays, declared classes and interfaces over
/// the anonymous object fallbacks. A type matching nothing is a dispatch
/// exhaustion error.
fn classify(table: &TypeTable, id: TypeId) -> Result<TypeKind, DocError> {
    let data = table.type_data(id);
    let flags = data.flags;

    if flags.intersects(TypeFlags::ANY) {
        return Ok(TypeKind::Any);
    }
    if flags.intersects(TypeFlags::NEVER) {
        return Ok(TypeKind::Never);
    }
    if flags.intersects(TypeFlags::NULL) {
        return Ok(TypeKind::Null);
    }
    if flags.intersects(TypeFlags::UNDEFINED) {
        return Ok(TypeKind::Undefined);
    }
    if flags.intersects(TypeFlags::UNKNOWN) {
        return Ok(TypeKind::Unknown);
    }
    if flags.intersects(TypeFlags::VOID) {
        return Ok(TypeKind::Void);
    }

    if flags.intersects(TypeFlags::BIGINT_LITERAL) {
        return Ok(TypeKind::BigintLiteral);
    }
    if flags.intersects(TypeFlags::BOOLEAN_LITERAL) {
        return Ok(TypeKind::BooleanLiteral);
    }
    if flags.intersects(TypeFlags::NUMBER_LITERAL) {
        return Ok(TypeKind::NumberLiteral);
    }
    if flags.intersects(TypeFlags::STRING_LITERAL) {
        return Ok(TypeKind::StringLiteral);
    }
    if flags.intersects(TypeFlags::UNIQUE_SYMBOL) {
        return Ok(TypeKind::SymbolLiteral);
    }

    if flags.intersects(TypeFlags::BIGINT) {
        return Ok(TypeKind::Bigint);
    }
    if flags.intersects(TypeFlags::BOOLEAN) {
        return Ok(TypeKind::Boolean);
    }
    if flags.intersects(TypeFlags::NUMBER) {
        return Ok(TypeKind::Number);
    }
    if flags.intersects(TypeFlags::STRING) {
        return Ok(TypeKind::String);
    }
    if flags.intersects(TypeFlags::SYMBOL) {
        return Ok(TypeKind::Symbol);
    }

    if is_tuple_reference(table, data) {
        return Ok(TypeKind::Tuple);
    }
    if flags.intersects(TypeFlags::INTERSECTION) {
        return Ok(TypeKind::Intersection);
    }
    if flags.intersects(TypeFlags::UNION) {
        return Ok(TypeKind::Union);
    }
    if is_array_reference(data) {
        return Ok(TypeKind::Array);
    }

    if data.object_flags.contains(ObjectFlags::CLASS) {
        return Ok(TypeKind::Constructible);
    }
    if data.object_flags.intersects(ObjectFlags::CLASS_OR_INTERFACE) {
        return Ok(if data.construct_signatures.is_empty() {
            TypeKind::Interface
        } else {
            TypeKind::Constructible
        });
    }
    if !data.call_signatures.is_empty() {
        return Ok(TypeKind::Function);
    }
    if flags.intersects(TypeFlags::TYPE_PARAMETER) {
        return Ok(TypeKind::TypeParameter);
    }

    if flags.intersects(TypeFlags::OBJECT) {
        if !data.construct_signatures.is_empty() && table.declaring_symbol(id).is_some() {
            return Ok(TypeKind::Constructible);
        }
        if data.object_flags.intersects(ObjectFlags::ANONYMOUS) {
            return Ok(TypeKind::Interface);
        }
        return Ok(TypeKind::Object);
    }

    Err(DocError::UnknownTypeKind {
        flags,
        object_flags: data.object_flags,
    })
}

// ============================================================================
// DOCUMENTER
// ============================================================================

/// Document one type from `table` as a fresh top-level pass.
pub fn document_type(table: &TypeTable, id: TypeId) -> Result<TypeDoc, DocError> {
    Documenter::new(table).document(id)
}

/// Recursive builder state for one documentation pass.
///
/// The in-progress stack holds the resolved names of the constructibles
/// and aliased callables currently being expanded; meeting one of them
/// again short-circuits to the `"self"` sentinel.
pub struct Documenter<'a> {
    table: &'a TypeTable,
    in_progress: Vec<SmolStr>,
}

impl<'a> Documenter<'a> {
    /// Create a documenter over `table` with an empty stack.
    pub fn new(table: &'a TypeTable) -> Self {
        Self {
            table,
            in_progress: Vec::new(),
        }
    }

    /// Document one type.
    pub fn document(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let kind = classify(self.table, id)?;
        trace!("[DOC] {:?} classified as {:?}", id, kind);
        match kind {
            TypeKind::Any => Ok(TypeDoc::Any),
            TypeKind::Never => Ok(TypeDoc::Never),
            TypeKind::Null => Ok(TypeDoc::Null),
            TypeKind::Undefined => Ok(TypeDoc::Undefined),
            TypeKind::Unknown => Ok(TypeDoc::Unknown),
            TypeKind::Void => Ok(TypeDoc::Void),
            TypeKind::Bigint => Ok(TypeDoc::Bigint),
            TypeKind::Boolean => Ok(TypeDoc::Boolean),
            TypeKind::Number => Ok(TypeDoc::Number),
            TypeKind::String => Ok(TypeDoc::String),
            TypeKind::Symbol => Ok(TypeDoc::Symbol),
            TypeKind::Object => Ok(TypeDoc::Object),
            TypeKind::BigintLiteral
            | TypeKind::BooleanLiteral
            | TypeKind::NumberLiteral
            | TypeKind::StringLiteral
            | TypeKind::SymbolLiteral => self.document_literal(id, kind),
            TypeKind::Array => self.document_array(id),
            TypeKind::Tuple => self.document_tuple(id),
            TypeKind::Union => self.document_union(id),
            TypeKind::Intersection => self.document_intersection(id),
            TypeKind::Interface => self.document_interface(id),
            TypeKind::Function => self.document_function(id),
            TypeKind::Constructible => self.document_constructible(id),
            TypeKind::TypeParameter => self.document_type_parameter(id),
        }
    }

    /// Document a signature parameter symbol.
    pub fn document_parameter(&mut self, sym_id: SymbolId) -> Result<ParamDoc, DocError> {
        let table = self.table;
        let sym = table.symbol(sym_id);
        let ty_id = sym.ty.ok_or_else(|| DocError::type_shape("a typed parameter"))?;
        let default = match sym.default_ty {
            Some(default_ty) => Some(self.document(default_ty)?),
            None => None,
        };
        Ok(ParamDoc {
            name: sym.name.clone(),
            is_optional: sym.optional,
            default,
            ty: self.document(ty_id)?,
        })
    }

    // ------------------------------------------------------------------
    // Per-kind builders
    // ------------------------------------------------------------------

    fn document_literal(&self, id: TypeId, kind: TypeKind) -> Result<TypeDoc, DocError> {
        if kind == TypeKind::SymbolLiteral {
            return Ok(TypeDoc::Literal(LiteralDoc::Symbol));
        }
        let data = self.table.type_data(id);
        let doc = match (kind, data.literal.as_ref()) {
            (TypeKind::StringLiteral, Some(LiteralValue::String(value))) => LiteralDoc::String {
                value: value.clone(),
            },
            (TypeKind::NumberLiteral, Some(LiteralValue::Number(value))) => {
                LiteralDoc::Number { value: *value }
            }
            (TypeKind::BooleanLiteral, Some(LiteralValue::Boolean(value))) => {
                LiteralDoc::Boolean { value: *value }
            }
            (TypeKind::BigintLiteral, Some(LiteralValue::BigInt { negative, base10 })) => {
                LiteralDoc::Bigint {
                    value: bigint_value(*negative, base10),
                }
            }
            _ => return Err(DocError::type_shape("a matching literal payload")),
        };
        Ok(TypeDoc::Literal(doc))
    }

    fn document_array(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let info = self
            .table
            .type_data(id)
            .index_info
            .ok_or_else(|| DocError::type_shape("an array with a numeric index signature"))?;
        Ok(TypeDoc::Array(ArrayDoc {
            is_readonly: info.is_readonly,
            element: Box::new(self.document(info.value_type)?),
        }))
    }

    fn document_tuple(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let table = self.table;
        let data = table.type_data(id);
        let target_id = data
            .target
            .ok_or_else(|| DocError::type_shape("a tuple type reference"))?;
        let target = table.type_data(target_id);
        if !target.object_flags.intersects(ObjectFlags::TUPLE) {
            return Err(DocError::type_shape("a tuple target shape"));
        }
        let elements = data
            .type_args
            .iter()
            .map(|arg| self.document(*arg))
            .collect::<Result<Vec<_>, _>>()?;
        let (alias, sources) = self.alias_of(id);
        Ok(TypeDoc::Tuple(TupleDoc {
            is_readonly: target.readonly,
            elements,
            alias,
            sources,
        }))
    }

    fn document_union(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let table = self.table;
        let data = table.type_data(id);
        let types = data
            .members
            .iter()
            .map(|member| self.document(*member))
            .collect::<Result<Vec<_>, _>>()?;
        let (alias, sources) = self.alias_of(id);
        let projected = table.non_nullable(id);
        let non_nullable = if projected == id {
            None
        } else {
            Some(Box::new(self.document(projected)?))
        };
        Ok(TypeDoc::Union(UnionDoc {
            types,
            alias,
            sources,
            non_nullable,
        }))
    }

    fn document_intersection(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let table = self.table;
        let types = table
            .type_data(id)
            .members
            .iter()
            .map(|member| self.document(*member))
            .collect::<Result<Vec<_>, _>>()?;
        let (alias, sources) = self.alias_of(id);
        Ok(TypeDoc::Intersection(IntersectionDoc {
            types,
            alias,
            sources,
        }))
    }

    fn document_interface(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let table = self.table;
        let mut members = OrderedMap::new();
        for sym_id in table.properties_of(id) {
            let sym = table.symbol(*sym_id);
            let ty_id = sym
                .ty
                .ok_or_else(|| DocError::type_shape("a typed interface member"))?;
            let ty = self.document(ty_id)?;
            members.insert(
                sym.name.clone(),
                Member {
                    is_optional: sym.optional,
                    is_readonly: sym.readonly,
                    ty,
                },
            );
        }
        let (alias, sources) = self.alias_of(id);
        Ok(TypeDoc::Interface(InterfaceDoc {
            members,
            alias,
            sources,
        }))
    }

    fn document_function(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let (alias, sources) = self.alias_of(id);

        if let Some(name) = &alias {
            if self.in_progress.contains(name) {
                trace!("[DOC] '{}' is already being documented, emitting sentinel", name);
                return Ok(TypeDoc::Function(FunctionDoc {
                    calls: Vec::new(),
                    alias,
                    sources,
                }));
            }
            self.in_progress.push(name.clone());
        }
        let calls = self.document_call_signatures(id);
        if alias.is_some() {
            self.in_progress.pop();
        }

        Ok(TypeDoc::Function(FunctionDoc {
            calls: calls?,
            alias,
            sources,
        }))
    }

    fn document_call_signatures(&mut self, id: TypeId) -> Result<Vec<CallSignature>, DocError> {
        let table = self.table;
        let signatures = table.call_signatures(id);
        let mut calls = Vec::with_capacity(signatures.len());
        for signature in signatures {
            let mut parameters = Vec::with_capacity(signature.parameters.len());
            for param in &signature.parameters {
                if self.is_self_parameter(*param)? {
                    trace!(
                        "[DOC] parameter '{}' re-enters the callable being documented, emitting sentinel",
                        table.symbol(*param).name
                    );
                    parameters.push(SignatureParam::SelfRef);
                } else {
                    parameters.push(SignatureParam::Param(self.document_parameter(*param)?));
                }
            }
            calls.push(CallSignature {
                parameters,
                returns: self.document(signature.return_type)?,
            });
        }
        Ok(calls)
    }

    /// True when this parameter's type is, by resolved name, a callable
    /// currently being expanded higher in the pass.
    fn is_self_parameter(&self, sym_id: SymbolId) -> Result<bool, DocError> {
        let table = self.table;
        let Some(ty_id) = table.symbol(sym_id).ty else {
            return Ok(false);
        };
        let named_in_progress = table
            .naming_symbol(ty_id)
            .is_some_and(|name_sym| self.in_progress.contains(&table.symbol(name_sym).name));
        if !named_in_progress {
            return Ok(false);
        }
        Ok(classify(table, ty_id)? == TypeKind::Function)
    }

    fn document_constructible(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let table = self.table;
        let sym_id = table
            .declaring_symbol(id)
            .ok_or_else(|| DocError::type_shape("a named constructible type"))?;
        let name = table.qualified_of(sym_id);
        let sources: SourceSet = table.symbol(sym_id).sources.iter().cloned().collect();

        if self.in_progress.contains(&name) {
            trace!("[DOC] '{}' is already being documented, emitting sentinel", name);
            return Ok(TypeDoc::Constructible(ConstructibleDoc {
                name,
                constructors: Constructors::SelfRef,
                sources,
            }));
        }

        self.in_progress.push(name.clone());
        let overloads = self.document_construct_overloads(id);
        self.in_progress.pop();

        Ok(TypeDoc::Constructible(ConstructibleDoc {
            name,
            constructors: Constructors::Overloads(overloads?),
            sources,
        }))
    }

    fn document_construct_overloads(
        &mut self,
        id: TypeId,
    ) -> Result<Vec<Vec<ParamDoc>>, DocError> {
        let table = self.table;
        let signatures = table.construct_signatures(id);
        let mut overloads = Vec::with_capacity(signatures.len());
        for signature in signatures {
            let mut parameters = Vec::with_capacity(signature.parameters.len());
            for param in &signature.parameters {
                parameters.push(self.document_parameter(*param)?);
            }
            overloads.push(parameters);
        }
        Ok(overloads)
    }

    fn document_type_parameter(&mut self, id: TypeId) -> Result<TypeDoc, DocError> {
        let table = self.table;
        let data = table.type_data(id);
        let sym = data
            .symbol
            .map(|sym_id| table.symbol(sym_id))
            .ok_or_else(|| DocError::type_shape("a named type parameter"))?;
        let name = sym.name.clone();
        let constraint = match data.constraint {
            Some(constraint) => self.document(constraint)?,
            None => TypeDoc::Unknown,
        };
        let default = match data.default {
            Some(default) => Some(Box::new(self.document(default)?)),
            None => None,
        };
        Ok(TypeDoc::TypeParameter(TypeParamDoc {
            name,
            is_const: data.is_const,
            constraint: Box::new(constraint),
            default,
        }))
    }

    fn alias_of(&self, id: TypeId) -> (Option<SmolStr>, Option<SourceSet>) {
        let table = self.table;
        match table.naming_symbol(id) {
            None => (None, None),
            Some(sym_id) => {
                let sym = table.symbol(sym_id);
                let sources: SourceSet = sym.sources.iter().cloned().collect();
                let sources = if sources.is_empty() {
                    None
                } else {
                    Some(sources)
                };
                (Some(sym.name.clone()), sources)
            }
        }
    }
}

fn bigint_value(negative: bool, base10: &str) -> String {
    if negative && base10 != "0" {
        format!("-{base10}")
    } else {
        base10.to_string()
    }
}
