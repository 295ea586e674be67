//! Documentation tree and the recursive type documenter.
//!
//! `tree` holds the serializable model, `maps` its order-preserving
//! containers, and `build` the classifier-driven builder that walks the
//! semantic type table into the tree.

mod build;
mod maps;
mod tree;

pub use build::{Documenter, document_type};
pub use maps::{OrderedMap, SourceSet};
pub use tree::{
    ArrayDoc, CallSignature, ConstructibleDoc, Constructors, FunctionDoc, InterfaceDoc,
    IntersectionDoc, LiteralDoc, Member, ParamDoc, SELF_SENTINEL, SignatureParam, TupleDoc,
    TypeDoc, TypeParamDoc, UnionDoc,
};
