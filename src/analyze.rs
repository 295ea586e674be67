//! Stateless analyzers over the documentation tree.
//!
//! These helpers encode the consumer-facing taxonomy: whether a prop is a
//! render-callback snippet, whether a type is an event handler, and which
//! declaration files an inherited prop came from. They operate purely on
//! finished [`TypeDoc`] trees and never consult a type table.

use crate::doc::{SignatureParam, SourceSet, TypeDoc};
use crate::extract::Prop;

/// Alias name of the render-callback type.
pub const SNIPPET_ALIAS: &str = "Snippet";

/// Alias suffix shared by the generated event handler types.
pub const EVENT_HANDLER_SUFFIX: &str = "EventHandler";

/// Whether a prop is a render-callback snippet.
///
/// A snippet is a function type aliased `Snippet` resolving from a
/// declaration file; a local type that happens to share the name does
/// not qualify.
pub fn is_snippet(prop: &Prop) -> bool {
    match &prop.ty {
        TypeDoc::Function(function) => {
            function.alias.as_deref() == Some(SNIPPET_ALIAS) && function.sources.is_some()
        }
        _ => false,
    }
}

/// The documented parameter types a snippet is rendered with.
///
/// Snippet parameters travel as a single tuple-typed signature parameter.
/// Returns `None` for non-snippets and for parameterless snippets whose
/// signature carries no tuple.
pub fn snippet_parameters(prop: &Prop) -> Option<&[TypeDoc]> {
    if !is_snippet(prop) {
        return None;
    }
    let TypeDoc::Function(function) = &prop.ty else {
        return None;
    };
    let call = function.calls.first()?;
    let SignatureParam::Param(param) = call.parameters.first()? else {
        return None;
    };
    match &param.ty {
        TypeDoc::Tuple(tuple) => Some(&tuple.elements),
        _ => None,
    }
}

/// Whether a documented type is an event handler function.
pub fn is_event_handler(doc: &TypeDoc) -> bool {
    match doc {
        TypeDoc::Function(function) => function
            .alias
            .as_deref()
            .is_some_and(|alias| alias.ends_with(EVENT_HANDLER_SUFFIX)),
        _ => false,
    }
}

/// The foreign declaration files an extended prop was inherited from.
pub fn extended_sources(prop: &Prop) -> Option<&SourceSet> {
    if prop.is_extended { prop.sources.as_ref() } else { None }
}
