//! Component surface extraction.
//!
//! The extractor drives the semantic type table over a compiled module:
//! it locates the synthesized entry function, reads the surface members off
//! its return type, decides legacy versus modern mode, and assembles the
//! [`ComponentDocs`] value with every reachable type documented.
//!
//! Member extraction is deliberately forgiving about names it does not
//! know: future compiler versions may grow the surface, and an unknown
//! member must not break older documenters. Missing `props` or `bindings`
//! members, on the other hand, mean compiler and documenter have drifted
//! apart and are fatal.

use rustc_hash::FxHashMap;
use smol_str::{SmolStr, format_smolstr};
use tracing::{debug, trace};

use crate::compile::{ENTRY_FUNCTION, Module, Statement};
use crate::doc::{Documenter, OrderedMap, TypeDoc};
use crate::error::DocError;
use crate::sema::{LiteralValue, SymbolId, TypeFlags, TypeId, TypeTable};

mod surface;

pub use surface::{ComponentDocs, LegacyDocs, ModernDocs, Prop};

// Convenience re-export; `Prop::tags` holds these.
pub use crate::sema::Tag;

/// Prefix applied to every documented event name.
pub const EVENT_PREFIX: &str = "on:";

/// Extract the documented surface of a compiled module.
pub fn extract_docs(module: &Module) -> Result<ComponentDocs, DocError> {
    Extractor::new(module).extract()
}

// ============================================================================
// EXTRACTOR
// ============================================================================

/// Surface members read off the entry function's return type.
#[derive(Default)]
struct SurfaceMembers {
    props: Option<SymbolId>,
    bindings: Option<SymbolId>,
    slots: Option<SymbolId>,
    exports: Option<SymbolId>,
    events: Option<SymbolId>,
}

struct Extractor<'a> {
    module: &'a Module,
    documenter: Documenter<'a>,
}

impl<'a> Extractor<'a> {
    fn new(module: &'a Module) -> Self {
        Self {
            module,
            documenter: Documenter::new(&module.table),
        }
    }

    fn table(&self) -> &'a TypeTable {
        &self.module.table
    }

    fn extract(mut self) -> Result<ComponentDocs, DocError> {
        let table = self.table();
        let module = self.module;

        let entry = module
            .entry_symbol()
            .ok_or(DocError::entry_not_found(ENTRY_FUNCTION))?;
        let entry_ty = table.symbol(entry).ty.ok_or(DocError::SignatureNotFound)?;
        let signature = table
            .call_signatures(entry_ty)
            .first()
            .ok_or(DocError::SignatureNotFound)?;

        let members = self.surface_members(signature.return_type);
        let props_member = members
            .props
            .ok_or_else(|| DocError::member_not_found("props"))?;
        let bindings_member = members
            .bindings
            .ok_or_else(|| DocError::member_not_found("bindings"))?;

        let bindable = bindable_names(table, self.member_type(bindings_member)?)?;
        let defaults = default_exprs(module);

        let props =
            self.assemble_props(self.member_type(props_member)?, &bindable, &defaults)?;
        let exports = match members.exports {
            Some(member) => self.assemble_exports(self.member_type(member)?)?,
            None => OrderedMap::new(),
        };
        let events = match members.events {
            Some(member) => self.assemble_events(self.member_type(member)?)?,
            None => OrderedMap::new(),
        };
        let slots = match members.slots {
            Some(member) => self.assemble_slots(self.member_type(member)?)?,
            None => OrderedMap::new(),
        };

        // Legacy mode is a three-way disjunction; a modern-syntax source
        // that still declares slots or events documents as legacy.
        let legacy = module.legacy_declaration || !slots.is_empty() || !events.is_empty();
        debug!(
            "[EXTRACT] '{}': {} props, {} exports, legacy={}",
            module.file,
            props.len(),
            exports.len(),
            legacy
        );

        let docs = if legacy {
            ComponentDocs::Legacy(LegacyDocs {
                description: module.description.clone(),
                tags: module.tags.clone(),
                props,
                exports,
                events,
                slots,
            })
        } else {
            ComponentDocs::Modern(ModernDocs {
                description: module.description.clone(),
                tags: module.tags.clone(),
                props,
                exports,
            })
        };
        Ok(docs)
    }

    fn surface_members(&self, return_ty: TypeId) -> SurfaceMembers {
        let table = self.table();
        let mut members = SurfaceMembers::default();
        for sym_id in table.properties_of(return_ty) {
            match table.symbol(*sym_id).name.as_str() {
                "props" => members.props = Some(*sym_id),
                "bindings" => members.bindings = Some(*sym_id),
                "slots" => members.slots = Some(*sym_id),
                "exports" => members.exports = Some(*sym_id),
                "events" => members.events = Some(*sym_id),
                other => trace!("[EXTRACT] ignoring unknown surface member '{}'", other),
            }
        }
        members
    }

    fn member_type(&self, sym_id: SymbolId) -> Result<TypeId, DocError> {
        self.table()
            .symbol(sym_id)
            .ty
            .ok_or_else(|| DocError::type_shape("a typed surface member"))
    }

    fn assemble_props(
        &mut self,
        ty: TypeId,
        bindable: &[SmolStr],
        defaults: &FxHashMap<SmolStr, TypeId>,
    ) -> Result<OrderedMap<Prop>, DocError> {
        let table = self.table();
        let mut props = OrderedMap::new();
        for sym_id in table.properties_of(ty) {
            let (name, prop) = self.assemble_prop(*sym_id, bindable, defaults)?;
            props.insert(name, prop);
        }
        Ok(props)
    }

    fn assemble_prop(
        &mut self,
        sym_id: SymbolId,
        bindable: &[SmolStr],
        defaults: &FxHashMap<SmolStr, TypeId>,
    ) -> Result<(SmolStr, Prop), DocError> {
        let table = self.table();
        let sym = table.symbol(sym_id);
        let name = sym.name.clone();
        let ty_id = sym
            .ty
            .ok_or_else(|| DocError::type_shape("a typed prop symbol"))?;

        let own_file = self.module.file.as_str();
        let is_extended =
            !sym.sources.is_empty() && !sym.sources.iter().any(|source| source == own_file);
        let sources = if is_extended {
            Some(sym.sources.iter().cloned().collect())
        } else {
            None
        };

        let default = match defaults.get(&name) {
            Some(init_ty) => Some(self.documenter.document(*init_ty)?),
            None => None,
        };

        let prop = Prop {
            tags: sym.tags.clone(),
            is_bindable: bindable.contains(&name),
            is_extended,
            is_optional: sym.optional,
            default,
            description: sym.description.clone(),
            sources,
            ty: self.documenter.document(ty_id)?,
        };
        Ok((name, prop))
    }

    fn assemble_exports(&mut self, ty: TypeId) -> Result<OrderedMap<TypeDoc>, DocError> {
        let table = self.table();
        let mut exports = OrderedMap::new();
        for sym_id in table.properties_of(ty) {
            let sym = table.symbol(*sym_id);
            let ty_id = sym
                .ty
                .ok_or_else(|| DocError::type_shape("a typed export symbol"))?;
            exports.insert(sym.name.clone(), self.documenter.document(ty_id)?);
        }
        Ok(exports)
    }

    fn assemble_events(&mut self, ty: TypeId) -> Result<OrderedMap<TypeDoc>, DocError> {
        let table = self.table();
        let mut events = OrderedMap::new();
        for sym_id in table.properties_of(ty) {
            let sym = table.symbol(*sym_id);
            let ty_id = sym
                .ty
                .ok_or_else(|| DocError::type_shape("a typed event symbol"))?;
            events.insert(
                format_smolstr!("{}{}", EVENT_PREFIX, sym.name),
                self.documenter.document(ty_id)?,
            );
        }
        Ok(events)
    }

    fn assemble_slots(
        &mut self,
        ty: TypeId,
    ) -> Result<OrderedMap<OrderedMap<Prop>>, DocError> {
        let table = self.table();
        let no_bindable: [SmolStr; 0] = [];
        let no_defaults = FxHashMap::default();
        let mut slots = OrderedMap::new();
        for sym_id in table.properties_of(ty) {
            let sym = table.symbol(*sym_id);
            let name = sym.name.clone();
            let slot_ty = sym
                .ty
                .ok_or_else(|| DocError::type_shape("a typed slot symbol"))?;
            let slot_props = self.assemble_props(slot_ty, &no_bindable, &no_defaults)?;
            slots.insert(name, slot_props);
        }
        Ok(slots)
    }
}

// ============================================================================
// FREE HELPERS
// ============================================================================

/// Decode the bindable property names off the `bindings` member type.
///
/// A loose string means "nothing bindable", a single string literal names
/// one bindable prop (the empty literal none), and a union must consist of
/// string literals naming one each. Anything else is a shape violation.
fn bindable_names(table: &TypeTable, ty: TypeId) -> Result<Vec<SmolStr>, DocError> {
    let data = table.type_data(ty);

    if data.flags.intersects(TypeFlags::STRING_LITERAL) {
        return match &data.literal {
            Some(LiteralValue::String(value)) if value.is_empty() => Ok(Vec::new()),
            Some(LiteralValue::String(value)) => Ok(vec![value.clone()]),
            _ => Err(DocError::BindingsShape),
        };
    }
    if data.flags.intersects(TypeFlags::STRING) {
        return Ok(Vec::new());
    }
    if data.flags.intersects(TypeFlags::UNION) {
        let mut names = Vec::with_capacity(data.members.len());
        for member in &data.members {
            let member_data = table.type_data(*member);
            if !member_data.flags.intersects(TypeFlags::STRING_LITERAL) {
                return Err(DocError::BindingsShape);
            }
            match &member_data.literal {
                Some(LiteralValue::String(value)) if value.is_empty() => {}
                Some(LiteralValue::String(value)) => names.push(value.clone()),
                _ => return Err(DocError::BindingsShape),
            }
        }
        return Ok(names);
    }
    Err(DocError::BindingsShape)
}

/// Collect default-value initializer types per property name.
///
/// The destructured-properties pattern wins when present; otherwise the
/// top-level non-reactive variable declarations of the entry body supply
/// the defaults.
fn default_exprs(module: &Module) -> FxHashMap<SmolStr, TypeId> {
    let mut defaults = FxHashMap::default();
    if let Some(pattern) = &module.body.props_pattern {
        for binding in &pattern.bindings {
            if let Some(init) = &binding.init {
                defaults.insert(binding.name.clone(), init.ty);
            }
        }
    } else {
        for statement in &module.body.statements {
            if let Statement::Var(decl) = statement {
                if decl.reactive {
                    continue;
                }
                if let Some(init) = &decl.init {
                    defaults.insert(decl.name.clone(), init.ty);
                }
            }
        }
    }
    defaults
}
