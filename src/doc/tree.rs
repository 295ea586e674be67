//! The canonical documentation tree.
//!
//! [`TypeDoc`] is a closed tagged union: every semantic type documents as
//! exactly one kind, and the serialized form carries the kind as a `"kind"`
//! tag. The tree is finite by construction; recursive expansions terminate
//! in the `"self"` sentinel instead of looping.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

use crate::doc::maps::{OrderedMap, SourceSet};

/// Sentinel standing in for a type's own recursive expansion.
pub const SELF_SENTINEL: &str = "self";

// ============================================================================
// TYPE DOC
// ============================================================================

/// Documentation of one semantic type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TypeDoc {
    Any,
    Bigint,
    Boolean,
    Never,
    Null,
    Number,
    Object,
    String,
    Symbol,
    Undefined,
    Unknown,
    Void,
    Array(ArrayDoc),
    Tuple(TupleDoc),
    Literal(LiteralDoc),
    Union(UnionDoc),
    Intersection(IntersectionDoc),
    Interface(InterfaceDoc),
    Function(FunctionDoc),
    Constructible(ConstructibleDoc),
    TypeParameter(TypeParamDoc),
}

impl TypeDoc {
    /// The serialized kind tag of this doc.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bigint => "bigint",
            Self::Boolean => "boolean",
            Self::Never => "never",
            Self::Null => "null",
            Self::Number => "number",
            Self::Object => "object",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Undefined => "undefined",
            Self::Unknown => "unknown",
            Self::Void => "void",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
            Self::Literal(_) => "literal",
            Self::Union(_) => "union",
            Self::Intersection(_) => "intersection",
            Self::Interface(_) => "interface",
            Self::Function(_) => "function",
            Self::Constructible(_) => "constructible",
            Self::TypeParameter(_) => "type-parameter",
        }
    }
}

// ============================================================================
// ADVANCED-KIND PAYLOADS
// ============================================================================

/// Documentation of an array type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayDoc {
    pub is_readonly: bool,
    pub element: Box<TypeDoc>,
}

/// Documentation of a tuple type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleDoc {
    pub is_readonly: bool,
    pub elements: Vec<TypeDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceSet>,
}

/// Documentation of a literal type, tagged by its primitive subkind.
///
/// Symbol literals carry no value. Bigint values travel as canonical
/// signed base-10 decimal strings since JSON numbers cannot hold them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subkind", rename_all = "lowercase")]
pub enum LiteralDoc {
    Bigint { value: String },
    Boolean { value: bool },
    Number { value: f64 },
    String { value: SmolStr },
    Symbol,
}

impl LiteralDoc {
    /// Create a string literal doc.
    pub fn string(value: impl Into<SmolStr>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    /// Create a number literal doc.
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    /// Create a boolean literal doc.
    pub fn boolean(value: bool) -> Self {
        Self::Boolean { value }
    }
}

/// Documentation of a union type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionDoc {
    pub types: Vec<TypeDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceSet>,
    /// The union with `null`/`undefined` members removed, attached only
    /// when that differs from the full union.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_nullable: Option<Box<TypeDoc>>,
}

/// Documentation of an intersection type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionDoc {
    pub types: Vec<TypeDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceSet>,
}

/// One member of an interface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub is_optional: bool,
    pub is_readonly: bool,
    #[serde(rename = "type")]
    pub ty: TypeDoc,
}

/// Documentation of an interface or inline object-literal type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDoc {
    pub members: OrderedMap<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceSet>,
}

/// One documented parameter of a signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDoc {
    pub name: SmolStr,
    pub is_optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<TypeDoc>,
    #[serde(rename = "type")]
    pub ty: TypeDoc,
}

/// A call-signature parameter: a documented parameter, or the enclosing
/// type standing in for itself.
#[derive(Clone, Debug, PartialEq)]
pub enum SignatureParam {
    Param(ParamDoc),
    SelfRef,
}

impl Serialize for SignatureParam {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Param(param) => param.serialize(serializer),
            Self::SelfRef => serializer.serialize_str(SELF_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for SignatureParam {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Sentinel(String),
            Param(ParamDoc),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Sentinel(s) if s == SELF_SENTINEL => Ok(Self::SelfRef),
            Raw::Sentinel(s) => Err(D::Error::custom(format!(
                "unknown parameter sentinel `{s}`"
            ))),
            Raw::Param(param) => Ok(Self::Param(param)),
        }
    }
}

/// One call signature of a function type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallSignature {
    pub parameters: Vec<SignatureParam>,
    pub returns: TypeDoc,
}

/// Documentation of a function type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDoc {
    pub calls: Vec<CallSignature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<SmolStr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceSet>,
}

/// Constructor overloads of a constructible type, or the `"self"` sentinel
/// when the constructible recursively contains its own type.
#[derive(Clone, Debug, PartialEq)]
pub enum Constructors {
    Overloads(Vec<Vec<ParamDoc>>),
    SelfRef,
}

impl Serialize for Constructors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Overloads(overloads) => overloads.serialize(serializer),
            Self::SelfRef => serializer.serialize_str(SELF_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for Constructors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Sentinel(String),
            Overloads(Vec<Vec<ParamDoc>>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Sentinel(s) if s == SELF_SENTINEL => Ok(Self::SelfRef),
            Raw::Sentinel(s) => Err(D::Error::custom(format!(
                "unknown constructors sentinel `{s}`"
            ))),
            Raw::Overloads(overloads) => Ok(Self::Overloads(overloads)),
        }
    }
}

/// Documentation of a class or other constructible type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructibleDoc {
    /// Resolved fully-qualified name.
    pub name: SmolStr,
    pub constructors: Constructors,
    pub sources: SourceSet,
}

/// Documentation of a type parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParamDoc {
    pub name: SmolStr,
    pub is_const: bool,
    /// Declared constraint; the `unknown` kind when the host exposes none.
    pub constraint: Box<TypeDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Box<TypeDoc>>,
}
