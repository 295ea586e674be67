//! JSON payload codec for component surfaces.
//!
//! Encoding turns a [`ComponentDocs`] into a transport payload, optionally
//! pretty-printed and optionally projected down to a requested set of
//! top-level keys. Decoding is permissive on purpose: a payload produced
//! by a projected encode still decodes cleanly, every field of
//! [`DecodedDocs`] being optional and unknown fields being ignored.
//! [`DecodedDocs::into_docs`] rebuilds the full surface when the payload
//! is complete.

use serde::ser::Serialize;
use serde::Deserialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer as JsonSerializer};

use crate::doc::{OrderedMap, TypeDoc};
use crate::error::DocError;
use crate::extract::{ComponentDocs, LegacyDocs, ModernDocs, Prop};
use crate::sema::Tag;

// ============================================================================
// ENCODE
// ============================================================================

/// Top-level keys of a serialized component surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceKey {
    IsLegacy,
    Description,
    Tags,
    Props,
    Exports,
    Events,
    Slots,
}

impl SurfaceKey {
    /// The serialized name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IsLegacy => "isLegacy",
            Self::Description => "description",
            Self::Tags => "tags",
            Self::Props => "props",
            Self::Exports => "exports",
            Self::Events => "events",
            Self::Slots => "slots",
        }
    }

    /// Whether this key exists only on legacy surfaces.
    pub fn is_legacy_only(&self) -> bool {
        matches!(self, Self::Events | Self::Slots)
    }
}

/// Options controlling [`encode`].
#[derive(Clone, Debug, Default)]
pub struct EncodeOptions {
    /// Pretty-print with this many spaces per indent level.
    pub indent: Option<usize>,
    /// Serialize only these top-level keys, computing nothing else.
    pub keys: Option<Vec<SurfaceKey>>,
}

impl EncodeOptions {
    /// Create default options: compact output, every key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style pretty-printing.
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = Some(width);
        self
    }

    /// Builder-style key projection.
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = SurfaceKey>) -> Self {
        self.keys = Some(keys.into_iter().collect());
        self
    }
}

/// Serialize a component surface to its JSON payload.
///
/// Requesting a legacy-only key for a modern surface is a mode violation,
/// exactly like calling the corresponding accessor would be.
pub fn encode(docs: &ComponentDocs, options: &EncodeOptions) -> Result<String, DocError> {
    match &options.keys {
        None => stringify(docs, options.indent),
        Some(keys) => {
            let projected = project(docs, keys)?;
            stringify(&projected, options.indent)
        }
    }
}

fn stringify<T: Serialize>(value: &T, indent: Option<usize>) -> Result<String, DocError> {
    match indent {
        None => Ok(serde_json::to_string(value)?),
        Some(width) => {
            let pad = " ".repeat(width);
            let formatter = PrettyFormatter::with_indent(pad.as_bytes());
            let mut out = Vec::new();
            let mut serializer = JsonSerializer::with_formatter(&mut out, formatter);
            value.serialize(&mut serializer)?;
            String::from_utf8(out).map_err(|err| DocError::payload(err.to_string()))
        }
    }
}

fn project(docs: &ComponentDocs, keys: &[SurfaceKey]) -> Result<Value, DocError> {
    let mut map = serde_json::Map::new();
    for key in keys {
        if key.is_legacy_only() && !docs.is_legacy() {
            return Err(DocError::legacy_only(key.as_str()));
        }
        let value = match key {
            SurfaceKey::IsLegacy => Value::Bool(docs.is_legacy()),
            SurfaceKey::Description => match docs.description() {
                Some(description) => Value::String(description.to_owned()),
                None => continue,
            },
            SurfaceKey::Tags => serde_json::to_value(docs.tags())?,
            SurfaceKey::Props => serde_json::to_value(docs.props())?,
            SurfaceKey::Exports => serde_json::to_value(docs.exports())?,
            SurfaceKey::Events => serde_json::to_value(docs.events()?)?,
            SurfaceKey::Slots => serde_json::to_value(docs.slots()?)?,
        };
        map.insert(key.as_str().to_owned(), value);
    }
    Ok(Value::Object(map))
}

// ============================================================================
// DECODE
// ============================================================================

/// A decoded surface payload, field by field.
///
/// Every field is optional so that projected payloads decode without
/// special-casing; fields that are present are validated strictly
/// (mappings must arrive as entry arrays, sets as string arrays).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedDocs {
    pub is_legacy: Option<bool>,
    pub description: Option<String>,
    pub tags: Option<Vec<Tag>>,
    pub props: Option<OrderedMap<Prop>>,
    pub exports: Option<OrderedMap<TypeDoc>>,
    pub events: Option<OrderedMap<TypeDoc>>,
    pub slots: Option<OrderedMap<OrderedMap<Prop>>>,
}

impl DecodedDocs {
    /// Rebuild the full component surface from a complete payload.
    ///
    /// Reports the first missing required field otherwise. A modern
    /// payload carrying stray `events`/`slots` fields has them dropped.
    pub fn into_docs(self) -> Result<ComponentDocs, DocError> {
        let is_legacy = self.is_legacy.ok_or(DocError::Incomplete("isLegacy"))?;
        let props = self.props.ok_or(DocError::Incomplete("props"))?;
        let exports = self.exports.ok_or(DocError::Incomplete("exports"))?;
        let description = self.description;
        let tags = self.tags.unwrap_or_default();

        if is_legacy {
            let events = self.events.ok_or(DocError::Incomplete("events"))?;
            let slots = self.slots.ok_or(DocError::Incomplete("slots"))?;
            Ok(ComponentDocs::Legacy(LegacyDocs {
                description,
                tags,
                props,
                exports,
                events,
                slots,
            }))
        } else {
            Ok(ComponentDocs::Modern(ModernDocs {
                description,
                tags,
                props,
                exports,
            }))
        }
    }
}

/// Deserialize a surface payload, tolerating projected and foreign fields.
pub fn decode(text: &str) -> Result<DecodedDocs, DocError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projecting_legacy_key_from_modern_surface_fails() {
        let docs = ComponentDocs::Modern(ModernDocs::default());
        let options = EncodeOptions::new().with_keys([SurfaceKey::Events]);
        let err = encode(&docs, &options).expect_err("events are legacy-only");
        assert!(matches!(err, DocError::LegacyOnly { field: "events" }));
    }

    #[test]
    fn test_into_docs_reports_missing_fields() {
        let err = DecodedDocs::default()
            .into_docs()
            .expect_err("empty payload is incomplete");
        assert!(matches!(err, DocError::Incomplete("isLegacy")));
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let decoded = decode(r#"{"isLegacy":false,"futureField":42}"#).expect("decode");
        assert_eq!(decoded.is_legacy, Some(false));
    }
}
