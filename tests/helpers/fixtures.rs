//! Component module fixtures.
//!
//! Integration tests drive the engine with hand-assembled semantic graphs
//! standing in for a real component compiler. The two fixture components
//! mirror the shapes a compiler produces: a modern button with a
//! destructured props pattern, and a legacy list with slots and events.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use compdoc::base::{FileKey, Stamp, Stamper, TextRange, TextSize};
use compdoc::compile::{
    CompilerConfig, ComponentCompiler, ENTRY_FUNCTION, ExprRef, Module, PatternBinding,
    PropsPattern, StaticCompiler, Statement, VarDecl,
};
use compdoc::error::DocError;
use compdoc::sema::{
    IndexInfo, LiteralValue, ObjectFlags, Signature, SymbolData, SymbolId, Tag, TypeData,
    TypeFlags, TypeId, TypeTable,
};

pub const BUTTON_FILE: &str = "src/Button.comp";
pub const LIST_FILE: &str = "src/List.comp";

pub fn button_key() -> FileKey {
    FileKey::from(BUTTON_FILE)
}

pub fn list_key() -> FileKey {
    FileKey::from(LIST_FILE)
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::from(start), TextSize::from(end))
}

// ============================================================================
// TYPE GRAPH BUILDERS
// ============================================================================

pub fn string_literal(table: &mut TypeTable, value: &str) -> TypeId {
    table.add_type(TypeData {
        flags: TypeFlags::STRING_LITERAL,
        literal: Some(LiteralValue::String(value.into())),
        ..Default::default()
    })
}

pub fn number_literal(table: &mut TypeTable, value: f64) -> TypeId {
    table.add_type(TypeData {
        flags: TypeFlags::NUMBER_LITERAL,
        literal: Some(LiteralValue::Number(value)),
        ..Default::default()
    })
}

pub fn boolean_literal(table: &mut TypeTable, value: bool) -> TypeId {
    table.add_type(TypeData {
        flags: TypeFlags::BOOLEAN_LITERAL,
        literal: Some(LiteralValue::Boolean(value)),
        ..Default::default()
    })
}

/// An anonymous function type with one call signature.
pub fn function_type(
    table: &mut TypeTable,
    parameters: Vec<SymbolId>,
    returns: TypeId,
) -> TypeId {
    table.add_type(TypeData {
        flags: TypeFlags::OBJECT,
        object_flags: ObjectFlags::ANONYMOUS,
        call_signatures: vec![Signature::new(parameters, returns)],
        ..Default::default()
    })
}

/// An anonymous object type carrying `properties`.
pub fn object_type(table: &mut TypeTable, properties: Vec<SymbolId>) -> TypeId {
    table.add_type(TypeData {
        flags: TypeFlags::OBJECT,
        object_flags: ObjectFlags::ANONYMOUS,
        properties,
        ..Default::default()
    })
}

/// An array type over `element`.
pub fn array_type(table: &mut TypeTable, element: TypeId) -> TypeId {
    table.add_type(TypeData {
        flags: TypeFlags::OBJECT,
        object_flags: ObjectFlags::REFERENCE,
        index_info: Some(IndexInfo {
            value_type: element,
            is_readonly: false,
        }),
        ..Default::default()
    })
}

/// A tuple type over `elements`.
pub fn tuple_type(table: &mut TypeTable, elements: Vec<TypeId>) -> TypeId {
    let target = table.add_type(TypeData {
        flags: TypeFlags::OBJECT,
        object_flags: ObjectFlags::TUPLE,
        ..Default::default()
    });
    table.add_type(TypeData {
        flags: TypeFlags::OBJECT,
        object_flags: ObjectFlags::REFERENCE,
        target: Some(target),
        type_args: elements,
        ..Default::default()
    })
}

/// Attach an alias symbol resolving from `source` to a type.
pub fn alias_type(table: &mut TypeTable, ty: TypeId, name: &str, source: &str) -> TypeId {
    let sym = table.add_symbol(SymbolData {
        name: name.into(),
        ty: Some(ty),
        sources: vec![source.into()],
        ..Default::default()
    });
    table.type_data_mut(ty).alias = Some(sym);
    ty
}

/// Wire surface member carriers into a synthesized entry function symbol.
pub fn wire_entry(table: &mut TypeTable, members: &[(&str, TypeId)]) -> SymbolId {
    let mut member_syms = Vec::with_capacity(members.len());
    for (name, ty) in members {
        member_syms.push(table.add_symbol(SymbolData::new(*name, *ty)));
    }
    let surface = object_type(table, member_syms);
    let entry_ty = function_type(table, Vec::new(), surface);
    table.add_symbol(SymbolData::new(ENTRY_FUNCTION, entry_ty))
}

// ============================================================================
// FIXTURE COMPONENTS
// ============================================================================

/// A modern button component.
///
/// Surface: `size?: "small" | "medium" | "large"` (bindable, default
/// `"medium"`), `disabled?: boolean` (bindable, default `false`),
/// `label: string`, `onclick?: MouseEventHandler` (inherited from a shared
/// declaration file), `children?: Snippet<[number]>`, and a `focus()`
/// instance export.
pub fn button_module() -> Module {
    let mut table = TypeTable::new();
    let string = table.intern_builtin(TypeFlags::STRING);
    let boolean = table.intern_builtin(TypeFlags::BOOLEAN);
    let number = table.intern_builtin(TypeFlags::NUMBER);
    let unknown = table.intern_builtin(TypeFlags::UNKNOWN);
    let void = table.intern_builtin(TypeFlags::VOID);

    let small = string_literal(&mut table, "small");
    let medium = string_literal(&mut table, "medium");
    let large = string_literal(&mut table, "large");
    let size_union = table.add_union(vec![small, medium, large]);
    let size_sym = table.add_symbol(SymbolData {
        name: "size".into(),
        ty: Some(size_union),
        optional: true,
        description: Some("Visual size of the button.".into()),
        sources: vec![BUTTON_FILE.into()],
        ..Default::default()
    });

    let disabled_sym = table.add_symbol(SymbolData {
        name: "disabled".into(),
        ty: Some(boolean),
        optional: true,
        sources: vec![BUTTON_FILE.into()],
        ..Default::default()
    });

    let label_sym = table.add_symbol(SymbolData {
        name: "label".into(),
        ty: Some(string),
        description: Some("Text rendered inside the button.".into()),
        tags: vec![Tag::with_content("since", "2.0")],
        sources: vec![BUTTON_FILE.into()],
        ..Default::default()
    });

    let event_param = table.add_symbol(SymbolData::new("event", unknown));
    let onclick_ty = function_type(&mut table, vec![event_param], void);
    alias_type(&mut table, onclick_ty, "MouseEventHandler", "lib/dom-handlers.d.ts");
    let onclick_sym = table.add_symbol(SymbolData {
        name: "onclick".into(),
        ty: Some(onclick_ty),
        optional: true,
        sources: vec!["lib/dom-handlers.d.ts".into()],
        ..Default::default()
    });

    let args_tuple = tuple_type(&mut table, vec![number]);
    let args_param = table.add_symbol(SymbolData::new("args", args_tuple));
    let children_ty = function_type(&mut table, vec![args_param], void);
    alias_type(&mut table, children_ty, "Snippet", "lib/runtime.d.ts");
    let children_sym = table.add_symbol(SymbolData {
        name: "children".into(),
        ty: Some(children_ty),
        optional: true,
        sources: vec![BUTTON_FILE.into()],
        ..Default::default()
    });

    let props_ty = object_type(
        &mut table,
        vec![size_sym, disabled_sym, label_sym, onclick_sym, children_sym],
    );

    let size_name = string_literal(&mut table, "size");
    let disabled_name = string_literal(&mut table, "disabled");
    let bindings_ty = table.add_union(vec![size_name, disabled_name]);

    let focus_ty = function_type(&mut table, Vec::new(), void);
    let focus_sym = table.add_symbol(SymbolData::new("focus", focus_ty));
    let exports_ty = object_type(&mut table, vec![focus_sym]);

    let default_size = string_literal(&mut table, "medium");
    let default_disabled = boolean_literal(&mut table, false);

    let entry = wire_entry(
        &mut table,
        &[
            ("props", props_ty),
            ("bindings", bindings_ty),
            ("exports", exports_ty),
        ],
    );

    let mut module = Module::new(button_key(), table);
    module.symbols = vec![entry];
    module.description = Some("A clickable button.".into());
    module.tags = vec![Tag::new("component")];
    module.text = Arc::from(
        "let { size = \"medium\", disabled = false, label, onclick, children } = $props();",
    );
    module.body.props_pattern = Some(PropsPattern {
        bindings: vec![
            PatternBinding {
                name: "size".into(),
                init: Some(ExprRef::new(default_size, range(13, 21))),
            },
            PatternBinding {
                name: "disabled".into(),
                init: Some(ExprRef::new(default_disabled, range(34, 39))),
            },
            PatternBinding {
                name: "label".into(),
                init: None,
            },
            PatternBinding {
                name: "onclick".into(),
                init: None,
            },
            PatternBinding {
                name: "children".into(),
                init: None,
            },
        ],
    });
    module
}

/// A legacy list component.
///
/// Surface: `items: string[]` (bindable), `title?: string` (default
/// `"Untitled"` from a top-level variable), `rows?: number` (reactive
/// initializer, so no documented default), `click`/`hover` events, and a
/// `default` slot carrying `{item, index}` plus an `empty` slot carrying
/// nothing.
pub fn list_module() -> Module {
    let mut table = TypeTable::new();
    let string = table.intern_builtin(TypeFlags::STRING);
    let number = table.intern_builtin(TypeFlags::NUMBER);
    let void = table.intern_builtin(TypeFlags::VOID);

    let items_ty = array_type(&mut table, string);
    let items_sym = table.add_symbol(SymbolData {
        name: "items".into(),
        ty: Some(items_ty),
        sources: vec![LIST_FILE.into()],
        ..Default::default()
    });

    let title_sym = table.add_symbol(SymbolData {
        name: "title".into(),
        ty: Some(string),
        optional: true,
        sources: vec![LIST_FILE.into()],
        ..Default::default()
    });

    let rows_sym = table.add_symbol(SymbolData {
        name: "rows".into(),
        ty: Some(number),
        optional: true,
        sources: vec![LIST_FILE.into()],
        ..Default::default()
    });

    let props_ty = object_type(&mut table, vec![items_sym, title_sym, rows_sym]);

    let bindings_ty = string_literal(&mut table, "items");

    let click_ty = function_type(&mut table, Vec::new(), void);
    let click_sym = table.add_symbol(SymbolData::new("click", click_ty));
    let hover_ty = function_type(&mut table, Vec::new(), void);
    let hover_sym = table.add_symbol(SymbolData::new("hover", hover_ty));
    let events_ty = object_type(&mut table, vec![click_sym, hover_sym]);

    let item_sym = table.add_symbol(SymbolData::new("item", string));
    let index_sym = table.add_symbol(SymbolData::new("index", number));
    let default_slot_ty = object_type(&mut table, vec![item_sym, index_sym]);
    let default_slot_sym = table.add_symbol(SymbolData::new("default", default_slot_ty));
    let empty_slot_ty = object_type(&mut table, Vec::new());
    let empty_slot_sym = table.add_symbol(SymbolData::new("empty", empty_slot_ty));
    let slots_ty = object_type(&mut table, vec![default_slot_sym, empty_slot_sym]);

    let untitled = string_literal(&mut table, "Untitled");
    let three = number_literal(&mut table, 3.0);

    let entry = wire_entry(
        &mut table,
        &[
            ("props", props_ty),
            ("bindings", bindings_ty),
            ("slots", slots_ty),
            ("events", events_ty),
        ],
    );

    let mut module = Module::new(list_key(), table);
    module.legacy_declaration = true;
    module.symbols = vec![entry];
    module.description = Some("Renders items as a list.".into());
    module.text = Arc::from("let title = \"Untitled\";\n$: rows = items.length;");
    module.body.statements = vec![
        Statement::Var(VarDecl {
            name: "title".into(),
            reactive: false,
            init: Some(ExprRef::new(untitled, range(12, 22))),
        }),
        Statement::Var(VarDecl {
            name: "rows".into(),
            reactive: true,
            init: Some(ExprRef::new(three, range(27, 45))),
        }),
    ];
    module
}

/// A compiler preloaded with both fixture components.
pub fn fixture_compiler() -> StaticCompiler {
    StaticCompiler::new()
        .with_module(button_module())
        .with_module(list_module())
}

// ============================================================================
// ENGINE DOUBLES
// ============================================================================

/// Wraps another compiler, counting compile calls.
pub struct CountingCompiler<C> {
    inner: C,
    calls: AtomicUsize,
}

impl<C> CountingCompiler<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of compile calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<C: ComponentCompiler> ComponentCompiler for CountingCompiler<C> {
    fn compile(
        &self,
        source: &str,
        key: &FileKey,
        config: &CompilerConfig,
    ) -> Result<Module, DocError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(source, key, config)
    }
}

/// Stamp oracle answering from a settable value instead of the filesystem.
pub struct FixedStamper {
    stamp: RwLock<Option<Stamp>>,
}

impl FixedStamper {
    pub fn new(stamp: Stamp) -> Self {
        Self {
            stamp: RwLock::new(Some(stamp)),
        }
    }

    /// Change what the oracle reports for every key from now on.
    pub fn set(&self, stamp: Option<Stamp>) {
        *self.stamp.write() = stamp;
    }
}

impl Stamper for FixedStamper {
    fn stamp(&self, _key: &FileKey) -> Option<Stamp> {
        *self.stamp.read()
    }
}
