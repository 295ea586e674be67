//! Order-preserving containers used throughout the documentation tree.
//!
//! Both containers serialize as arrays rather than JSON objects: a mapping
//! becomes an array of `[name, value]` entries and a set an array of values.
//! Declaration order is meaningful in component surfaces and JSON objects
//! do not reliably keep it across transports.

use indexmap::{IndexMap, IndexSet};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smol_str::SmolStr;

// ============================================================================
// ORDERED MAP
// ============================================================================

/// A name-to-value mapping preserving insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedMap<V>(IndexMap<SmolStr, V>);

impl<V> OrderedMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert an entry, replacing any previous value under the same name
    /// while keeping its original position.
    pub fn insert(&mut self, name: impl Into<SmolStr>, value: V) -> Option<V> {
        self.0.insert(name.into(), value)
    }

    /// Look up a value by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.0.get(name)
    }

    /// Whether an entry exists under `name`.
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &SmolStr> {
        self.0.keys()
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.values()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &V)> {
        self.0.iter()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<(SmolStr, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (SmolStr, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (SmolStr, V);
    type IntoIter = indexmap::map::IntoIter<SmolStr, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a SmolStr, &'a V);
    type IntoIter = indexmap::map::Iter<'a, SmolStr, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for entry in &self.0 {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(SmolStr, V)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

// ============================================================================
// SOURCE SET
// ============================================================================

/// An insertion-ordered set of declaring file locations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceSet(IndexSet<SmolStr>);

impl SourceSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self(IndexSet::new())
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no locations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a location, returning false when it was already present.
    pub fn insert(&mut self, source: impl Into<SmolStr>) -> bool {
        self.0.insert(source.into())
    }

    /// Whether `source` is in the set.
    pub fn contains(&self, source: &str) -> bool {
        self.0.contains(source)
    }

    /// Locations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &SmolStr> {
        self.0.iter()
    }
}

impl FromIterator<SmolStr> for SourceSet {
    fn from_iter<I: IntoIterator<Item = SmolStr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for SourceSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(SmolStr::from).collect())
    }
}

impl Serialize for SourceSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for source in &self.0 {
            seq.serialize_element(source)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SourceSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let sources = Vec::<SmolStr>::deserialize(deserializer)?;
        Ok(Self(sources.into_iter().collect()))
    }
}
