//! The flat field map produced by the decoder.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

// =============================================================================
// MetadataValue
// =============================================================================

/// A single metadata value: display text or a plain number.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Number(u32),
}

impl MetadataValue {
    /// The value as text, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadataValue::Text(text) => Some(text),
            MetadataValue::Number(_) => None,
        }
    }

    /// The value as a number, if it is a number.
    pub fn as_number(&self) -> Option<u32> {
        match self {
            MetadataValue::Number(n) => Some(*n),
            MetadataValue::Text(_) => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Text(text) => f.write_str(text),
            MetadataValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Number(value)
    }
}

impl From<u16> for MetadataValue {
    fn from(value: u16) -> Self {
        MetadataValue::Number(value as u32)
    }
}

// =============================================================================
// ExifMetadata
// =============================================================================

/// Fields extracted from an EXIF payload, in the order they were first found.
///
/// Setting a field that already exists replaces its value but keeps its
/// position. Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifMetadata {
    fields: Vec<(String, MetadataValue)>,
}

impl ExifMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetadataValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetadataValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for ExifMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
