//! The mapping engine: projects input records onto the configured layout.

use crate::error::{ConfigError, Result};
use crate::source::SampleRecord;

use super::config::{HeaderSpec, MapperConfig};

/// One resolved output row in final column order, plus the dedup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    /// Resolved cell values, one per configured output column.
    pub cells: Vec<String>,
    /// Resolved value of the unique-field column; `None` when blank.
    pub key: Option<String>,
}

/// Resolves records against a mapper configuration.
///
/// Resolution is a pure function of (record, configuration): identical inputs
/// always produce identical rows.
#[derive(Debug)]
pub struct MappingEngine<'c> {
    config: &'c MapperConfig,
    key_column: usize,
}

impl<'c> MappingEngine<'c> {
    /// Create an engine for the given unique field.
    ///
    /// Fails with [`ConfigError::UnknownUniqueField`] if the field matches no
    /// configured output column, before any record is touched.
    pub fn new(config: &'c MapperConfig, unique_field: &str) -> Result<Self> {
        let key_column = config
            .column_index(unique_field)
            .ok_or_else(|| ConfigError::UnknownUniqueField(unique_field.to_string()))?;

        Ok(Self { config, key_column })
    }

    /// Resolve one record into an output row.
    ///
    /// Missing fields resolve to empty strings; a record is never rejected
    /// for missing data.
    pub fn resolve(&self, record: &SampleRecord) -> OutputRow {
        let cells: Vec<String> = self
            .config
            .columns()
            .map(|spec| resolve_value(spec, record))
            .collect();

        let key = match cells[self.key_column].as_str() {
            "" => None,
            value => Some(value.to_string()),
        };

        OutputRow { cells, key }
    }
}

/// Resolve a single column value.
///
/// With a `sub_port_mapping`, portal column names are tried in declaration
/// order and the first field present on the record wins. Lookup then falls
/// back to the header's own name: exact, case-sensitive, no trimming.
fn resolve_value(spec: &HeaderSpec, record: &SampleRecord) -> String {
    if let Some(mapping) = &spec.sub_port_mapping {
        for portal_name in mapping.keys() {
            if let Some(value) = record.get(portal_name) {
                return value.to_string();
            }
        }
    }

    record.get(&spec.name).unwrap_or("").to_string()
}
