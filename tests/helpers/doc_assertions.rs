//! Doc tree assertion helpers.

use compdoc::doc::{FunctionDoc, LiteralDoc, TypeDoc, UnionDoc};
use compdoc::extract::{ComponentDocs, Prop};

/// Assert a doc has the expected kind tag.
pub fn assert_kind(doc: &TypeDoc, expected: &str) {
    assert_eq!(
        doc.kind_name(),
        expected,
        "expected a '{}' doc, got {:?}",
        expected,
        doc
    );
}

/// Get a prop off a surface, panicking helpfully when absent.
pub fn get_prop<'a>(docs: &'a ComponentDocs, name: &str) -> &'a Prop {
    docs.props()
        .get(name)
        .unwrap_or_else(|| panic!("expected prop '{}' on the surface", name))
}

/// Unwrap a union doc.
pub fn as_union(doc: &TypeDoc) -> &UnionDoc {
    match doc {
        TypeDoc::Union(union) => union,
        other => panic!("expected a union, got {other:?}"),
    }
}

/// Unwrap a function doc.
pub fn as_function(doc: &TypeDoc) -> &FunctionDoc {
    match doc {
        TypeDoc::Function(function) => function,
        other => panic!("expected a function, got {other:?}"),
    }
}

/// Assert a doc is a string literal carrying `expected`.
pub fn assert_string_literal(doc: &TypeDoc, expected: &str) {
    match doc {
        TypeDoc::Literal(LiteralDoc::String { value }) if value == expected => {}
        other => panic!("expected string literal \"{expected}\", got {other:?}"),
    }
}
