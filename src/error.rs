//! Error types for documentation operations.

use thiserror::Error;

use crate::sema::{ObjectFlags, TypeFlags};

/// Errors that can occur while compiling, extracting, documenting, or
/// encoding a component surface.
#[derive(Debug, Error)]
pub enum DocError {
    /// The compiled module has no entry function.
    #[error("entry function `{name}` not found in compiled module")]
    EntryFunctionNotFound { name: &'static str },

    /// The entry function's type exposes no call signature.
    #[error("entry function has no call signature")]
    SignatureNotFound,

    /// A required member is missing from the entry function's return type.
    #[error("member `{name}` not found on the entry return type")]
    MemberNotFound { name: &'static str },

    /// The `bindings` member is not a string or a union of string literals.
    #[error("bindings member is not a string-literal union")]
    BindingsShape,

    /// A semantic type matched no documentable kind.
    #[error("type matches no documentable kind (flags {flags:?}, object flags {object_flags:?})")]
    UnknownTypeKind {
        flags: TypeFlags,
        object_flags: ObjectFlags,
    },

    /// A per-kind builder precondition did not hold for the dispatched type.
    #[error("type shape mismatch: expected {expected}")]
    TypeShape { expected: &'static str },

    /// A legacy-only field was requested from a modern component.
    #[error("`{field}` is only available on legacy components")]
    LegacyOnly { field: &'static str },

    /// The external component compiler reported failure.
    #[error("compile error: {0}")]
    Compile(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload decoded but does not have the expected structure.
    #[error("malformed payload: {0}")]
    Payload(String),

    /// A decoded payload is missing a field required to rebuild the surface.
    #[error("incomplete docs payload: missing `{0}`")]
    Incomplete(&'static str),
}

/// Coarse classification of a [`DocError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The compiled module does not have the shape this crate expects.
    ShapeViolation,
    /// A semantic type fell through the kind classifier.
    DispatchExhaustion,
    /// A legacy-only surface was accessed on a modern component.
    ModeViolation,
    /// The external compiler failed.
    Compile,
    /// A transport payload could not be encoded or decoded.
    Codec,
}

impl DocError {
    /// Create an entry-function-not-found error.
    pub fn entry_not_found(name: &'static str) -> Self {
        Self::EntryFunctionNotFound { name }
    }

    /// Create a missing-member error.
    pub fn member_not_found(name: &'static str) -> Self {
        Self::MemberNotFound { name }
    }

    /// Create a builder precondition error.
    pub fn type_shape(expected: &'static str) -> Self {
        Self::TypeShape { expected }
    }

    /// Create a legacy-only access error.
    pub fn legacy_only(field: &'static str) -> Self {
        Self::LegacyOnly { field }
    }

    /// Create a compile error.
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile(message.into())
    }

    /// Create a malformed-payload error.
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }

    /// Classify this error into its coarse category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EntryFunctionNotFound { .. }
            | Self::SignatureNotFound
            | Self::MemberNotFound { .. }
            | Self::BindingsShape => ErrorCategory::ShapeViolation,
            Self::UnknownTypeKind { .. } | Self::TypeShape { .. } => {
                ErrorCategory::DispatchExhaustion
            }
            Self::LegacyOnly { .. } => ErrorCategory::ModeViolation,
            Self::Compile(_) => ErrorCategory::Compile,
            Self::Json(_) | Self::Payload(_) | Self::Incomplete(_) => ErrorCategory::Codec,
        }
    }
}
