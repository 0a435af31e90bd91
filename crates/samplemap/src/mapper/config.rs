//! Declarative mapper configuration: parsing and validation.
//!
//! A mapper document is a JSON object whose top-level keys are output column
//! names, in document order. Within a header object two keys are reserved:
//! `header` (display-name override) and `sub_port_mapping` (translation table
//! from portal column names to the facility's field). Numeric string keys
//! declare sub-header columns, ordered by numeric value and emitted
//! immediately after their parent.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::error::{ConfigError, Result, SamplemapError};

/// Reserved key: display-name override for the header row.
const KEY_HEADER: &str = "header";
/// Reserved key: portal-to-facility column name translation.
const KEY_SUB_PORT_MAPPING: &str = "sub_port_mapping";

/// Specification for a single output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    /// Output column key; also the source field name for direct lookup.
    pub name: String,
    /// Display-name override for the header row. Never affects lookup.
    pub display: Option<String>,
    /// Portal column names to try, in declaration order, before the direct
    /// lookup by `name`.
    pub sub_port_mapping: Option<IndexMap<String, String>>,
    /// Numbered child columns, emitted immediately after this one.
    pub sub_headers: Vec<HeaderSpec>,
}

impl HeaderSpec {
    /// Create a bare spec: direct lookup by name, no children.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display: None,
            sub_port_mapping: None,
            sub_headers: Vec::new(),
        }
    }

    /// The label used in the header row.
    pub fn display_name(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.name)
    }
}

/// Parsed mapper configuration: the ordered output column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    headers: Vec<HeaderSpec>,
}

impl MapperConfig {
    /// Parse a mapper document from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let RawEntries(entries) = serde_json::from_str(raw)
            .map_err(|e| ConfigError::ParseFailure(e.to_string()))?;

        let mut headers = Vec::with_capacity(entries.len());
        for (name, value) in &entries {
            headers.push(parse_header(name, value, true)?);
        }

        // Output columns must not collide anywhere in the flattened layout.
        let mut seen: HashSet<&str> = HashSet::new();
        for spec in flatten(&headers) {
            if !seen.insert(&spec.name) {
                return Err(ConfigError::DuplicateHeader(spec.name.clone()).into());
            }
        }

        Ok(Self { headers })
    }

    /// Load a mapper document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| SamplemapError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&raw)
    }

    /// Top-level header specs in configuration order.
    pub fn headers(&self) -> &[HeaderSpec] {
        &self.headers
    }

    /// Every output column spec in final column order, sub-headers
    /// immediately after their parent.
    pub fn columns(&self) -> impl Iterator<Item = &HeaderSpec> {
        flatten(&self.headers)
    }

    /// Number of output columns, sub-headers included.
    pub fn column_count(&self) -> usize {
        self.columns().count()
    }

    /// Position of a column by configured name, if any.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().position(|spec| spec.name == name)
    }

    /// The header row: display names in final column order.
    pub fn display_row(&self) -> Vec<String> {
        self.columns()
            .map(|spec| spec.display_name().to_string())
            .collect()
    }
}

/// Flatten header specs into final column order.
fn flatten(headers: &[HeaderSpec]) -> impl Iterator<Item = &HeaderSpec> {
    headers
        .iter()
        .flat_map(|h| std::iter::once(h).chain(h.sub_headers.iter()))
}

/// Parse one header body. `allow_subs` is false below the first level.
fn parse_header(name: &str, value: &Value, allow_subs: bool) -> Result<HeaderSpec> {
    let object = value.as_object().ok_or_else(|| ConfigError::InvalidHeader {
        header: name.to_string(),
        key: name.to_string(),
        reason: "expected an object".to_string(),
    })?;

    let mut spec = HeaderSpec::named(name);
    let mut numbered: Vec<(u64, HeaderSpec)> = Vec::new();

    for (key, entry) in object {
        match key.as_str() {
            KEY_HEADER => {
                let display = entry.as_str().ok_or_else(|| ConfigError::InvalidHeader {
                    header: name.to_string(),
                    key: key.clone(),
                    reason: "display override must be a string".to_string(),
                })?;
                spec.display = Some(display.to_string());
            }
            KEY_SUB_PORT_MAPPING => {
                spec.sub_port_mapping = Some(parse_sub_port_mapping(name, entry)?);
            }
            _ => {
                let index: u64 = key.parse().map_err(|_| ConfigError::InvalidHeader {
                    header: name.to_string(),
                    key: key.clone(),
                    reason: "expected a numeric sub-header index or a reserved key"
                        .to_string(),
                })?;
                if !allow_subs {
                    return Err(ConfigError::NestedSubHeader {
                        header: name.to_string(),
                        sub: key.clone(),
                    }
                    .into());
                }
                numbered.push((index, parse_sub_entry(name, key, entry)?));
            }
        }
    }

    // Ordered by numeric value, not insertion order.
    numbered.sort_by_key(|(index, _)| *index);
    spec.sub_headers = numbered.into_iter().map(|(_, sub)| sub).collect();

    Ok(spec)
}

/// Parse the value under a numbered key: either a bare column name or an
/// object with exactly one `name: body` entry.
fn parse_sub_entry(header: &str, key: &str, value: &Value) -> Result<HeaderSpec> {
    match value {
        Value::String(name) => Ok(HeaderSpec::named(name.clone())),
        Value::Object(object) => {
            let mut entries = object.iter();
            let (name, body) = entries.next().ok_or_else(|| ConfigError::InvalidHeader {
                header: header.to_string(),
                key: key.to_string(),
                reason: "sub-header must declare a column name".to_string(),
            })?;
            if entries.next().is_some() {
                return Err(ConfigError::InvalidHeader {
                    header: header.to_string(),
                    key: key.to_string(),
                    reason: "sub-header must declare exactly one column".to_string(),
                }
                .into());
            }
            // Sub-headers may carry the reserved keys but no numbered
            // children of their own.
            parse_header(name, body, false)
        }
        _ => Err(ConfigError::InvalidHeader {
            header: header.to_string(),
            key: key.to_string(),
            reason: "sub-header must be an object or a column name string".to_string(),
        }
        .into()),
    }
}

/// Parse a `sub_port_mapping` entry. The documented form is an object from
/// portal column name to canonical field name; a bare string is accepted as
/// shorthand for a single portal column.
fn parse_sub_port_mapping(header: &str, value: &Value) -> Result<IndexMap<String, String>> {
    match value {
        Value::String(portal) => {
            let mut mapping = IndexMap::with_capacity(1);
            mapping.insert(portal.clone(), header.to_string());
            Ok(mapping)
        }
        Value::Object(object) => {
            let mut mapping = IndexMap::with_capacity(object.len());
            for (portal, canonical) in object {
                let canonical =
                    canonical.as_str().ok_or_else(|| ConfigError::InvalidHeader {
                        header: header.to_string(),
                        key: KEY_SUB_PORT_MAPPING.to_string(),
                        reason: format!("mapping for '{}' must be a string", portal),
                    })?;
                mapping.insert(portal.clone(), canonical.to_string());
            }
            Ok(mapping)
        }
        _ => Err(ConfigError::InvalidHeader {
            header: header.to_string(),
            key: KEY_SUB_PORT_MAPPING.to_string(),
            reason: "expected an object or a portal column name string".to_string(),
        }
        .into()),
    }
}

/// Top-level object entries in document order, duplicates preserved.
///
/// `serde_json` maps silently collapse duplicate keys, which would hide the
/// duplicate-header invariant; collecting raw entries keeps every key.
struct RawEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object of output headers")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
