//! Component surface model.
//!
//! A documented component is either modern or legacy. Both expose props and
//! exports; only legacy components additionally expose slots and events.
//! The distinction is a sum type so the legacy-only fields cannot even be
//! represented on a modern surface; the convenience accessors return a
//! mode-violation error instead.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::doc::{OrderedMap, SourceSet, TypeDoc};
use crate::error::DocError;
use crate::sema::Tag;

// ============================================================================
// PROP
// ============================================================================

/// One documented component property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prop {
    /// Doc-comment tags on the property.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Whether the property can be bound by the consumer.
    pub is_bindable: bool,
    /// Whether the property is declared outside the component's own file.
    pub is_extended: bool,
    pub is_optional: bool,
    /// Documented type of the property's default-value initializer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<TypeDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declaring locations; present exactly when the property is extended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceSet>,
    #[serde(rename = "type")]
    pub ty: TypeDoc,
}

// ============================================================================
// COMPONENT SURFACE
// ============================================================================

/// Surface of a modern component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModernDocs {
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub props: OrderedMap<Prop>,
    pub exports: OrderedMap<TypeDoc>,
}

/// Surface of a legacy component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegacyDocs {
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub props: OrderedMap<Prop>,
    pub exports: OrderedMap<TypeDoc>,
    /// Event types keyed by their `on:`-prefixed names.
    pub events: OrderedMap<TypeDoc>,
    /// Per-slot prop maps keyed by slot name.
    pub slots: OrderedMap<OrderedMap<Prop>>,
}

/// The documented public surface of one component.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentDocs {
    Modern(ModernDocs),
    Legacy(LegacyDocs),
}

impl ComponentDocs {
    /// Whether this is a legacy surface.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// Component-level description.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Modern(docs) => docs.description.as_deref(),
            Self::Legacy(docs) => docs.description.as_deref(),
        }
    }

    /// Component-level doc-comment tags.
    pub fn tags(&self) -> &[Tag] {
        match self {
            Self::Modern(docs) => &docs.tags,
            Self::Legacy(docs) => &docs.tags,
        }
    }

    /// Documented properties.
    pub fn props(&self) -> &OrderedMap<Prop> {
        match self {
            Self::Modern(docs) => &docs.props,
            Self::Legacy(docs) => &docs.props,
        }
    }

    /// Documented exported bindings.
    pub fn exports(&self) -> &OrderedMap<TypeDoc> {
        match self {
            Self::Modern(docs) => &docs.exports,
            Self::Legacy(docs) => &docs.exports,
        }
    }

    /// Documented events. Modern components have none and answer with a
    /// mode-violation error.
    pub fn events(&self) -> Result<&OrderedMap<TypeDoc>, DocError> {
        match self {
            Self::Legacy(docs) => Ok(&docs.events),
            Self::Modern(_) => Err(DocError::legacy_only("events")),
        }
    }

    /// Documented slots. Modern components have none and answer with a
    /// mode-violation error.
    pub fn slots(&self) -> Result<&OrderedMap<OrderedMap<Prop>>, DocError> {
        match self {
            Self::Legacy(docs) => Ok(&docs.slots),
            Self::Modern(_) => Err(DocError::legacy_only("slots")),
        }
    }
}

impl From<ModernDocs> for ComponentDocs {
    fn from(docs: ModernDocs) -> Self {
        Self::Modern(docs)
    }
}

impl From<LegacyDocs> for ComponentDocs {
    fn from(docs: LegacyDocs) -> Self {
        Self::Legacy(docs)
    }
}

impl Serialize for ComponentDocs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Modern(docs) => {
                let mut len = 3;
                if docs.description.is_some() {
                    len += 1;
                }
                if !docs.tags.is_empty() {
                    len += 1;
                }
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("isLegacy", &false)?;
                if let Some(description) = &docs.description {
                    map.serialize_entry("description", description)?;
                }
                if !docs.tags.is_empty() {
                    map.serialize_entry("tags", &docs.tags)?;
                }
                map.serialize_entry("props", &docs.props)?;
                map.serialize_entry("exports", &docs.exports)?;
                map.end()
            }
            Self::Legacy(docs) => {
                let mut len = 5;
                if docs.description.is_some() {
                    len += 1;
                }
                if !docs.tags.is_empty() {
                    len += 1;
                }
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("isLegacy", &true)?;
                if let Some(description) = &docs.description {
                    map.serialize_entry("description", description)?;
                }
                if !docs.tags.is_empty() {
                    map.serialize_entry("tags", &docs.tags)?;
                }
                map.serialize_entry("props", &docs.props)?;
                map.serialize_entry("exports", &docs.exports)?;
                map.serialize_entry("events", &docs.events)?;
                map.serialize_entry("slots", &docs.slots)?;
                map.end()
            }
        }
    }
}
