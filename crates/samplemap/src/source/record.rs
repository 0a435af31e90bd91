//! Input records as emitted by a record source.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One submitted biosample row: portal field name to value, in portal order.
///
/// Emitted once by a record source and read-only thereafter; the mapping
/// engine never mutates a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    #[serde(flatten)]
    fields: IndexMap<String, String>,
}

impl SampleRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field value: exact, case-sensitive match on the field name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Whether the record carries the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Set a field value, replacing any existing value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Number of fields on the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in portal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for SampleRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
