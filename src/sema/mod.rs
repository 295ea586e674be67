//! Semantic type graph handed over by the host type-checking service.
//!
//! Component compilers populate a [`TypeTable`] per module; the extractor
//! and the documenter only read it. Flag words drive kind classification,
//! records carry the per-kind payloads.

mod flags;
mod table;

pub use flags::{ObjectFlags, TypeFlags};
pub use table::{
    ANONYMOUS_SYMBOL, IndexInfo, LiteralValue, Signature, SymbolData, SymbolId, Tag, TypeData,
    TypeId, TypeTable,
};
