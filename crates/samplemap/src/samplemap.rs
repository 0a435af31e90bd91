//! Main Samplemap struct and public API.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::mapper::{dedupe, MapperConfig, MappingEngine};
use crate::output::OutputTable;
use crate::source::RecordSource;

/// Options for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output column used as the deduplication key.
    pub unique_field: String,
    /// Whether to prepend the display-name header row.
    pub include_header: bool,
}

impl ExportOptions {
    /// Options with the given unique field and no header row.
    pub fn new(unique_field: impl Into<String>) -> Self {
        Self {
            unique_field: unique_field.into(),
            include_header: false,
        }
    }

    /// Request the header row.
    pub fn with_header(mut self) -> Self {
        self.include_header = true;
        self
    }
}

/// Result of an export run: the assembled table plus run statistics.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// The final table, ready for serialization.
    pub table: OutputTable,
    /// Summary statistics for the run.
    pub summary: ExportSummary,
}

/// Summary of an export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Records returned by the source.
    pub records_fetched: usize,
    /// Rows in the final table (excluding the header row).
    pub rows_exported: usize,
    /// Rows dropped by deduplication.
    pub duplicates_dropped: usize,
    /// Output columns, sub-headers included.
    pub column_count: usize,
    /// When the export ran.
    pub exported_at: DateTime<Utc>,
}

/// The mapping pipeline: validate, fetch, resolve, dedupe, assemble.
pub struct Samplemap {
    mapper: MapperConfig,
}

impl Samplemap {
    /// Create a pipeline for a loaded mapper configuration.
    pub fn new(mapper: MapperConfig) -> Self {
        Self { mapper }
    }

    /// The loaded mapper configuration.
    pub fn mapper(&self) -> &MapperConfig {
        &self.mapper
    }

    /// Run a full export for one submission.
    ///
    /// Configuration errors (including an unknown unique field) surface
    /// before the source is contacted; either the whole table is assembled
    /// or nothing is produced.
    pub fn export(
        &self,
        source: &dyn RecordSource,
        submission_id: &str,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let engine = MappingEngine::new(&self.mapper, &options.unique_field)?;

        let records = source.fetch(submission_id)?;
        let records_fetched = records.len();

        let resolved: Vec<_> = records.iter().map(|r| engine.resolve(r)).collect();
        let rows = dedupe(resolved);
        let duplicates_dropped = records_fetched - rows.len();

        let table = OutputTable::assemble(rows, &self.mapper, options.include_header);

        let summary = ExportSummary {
            records_fetched,
            rows_exported: table.row_count(),
            duplicates_dropped,
            column_count: self.mapper.column_count(),
            exported_at: Utc::now(),
        };

        Ok(ExportResult { table, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, SamplemapError};
    use crate::source::{SampleRecord, StaticSource};

    fn record(fields: &[(&str, &str)]) -> SampleRecord {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_export_dedupes_last_write_wins() {
        let mapper =
            MapperConfig::from_json(r#"{"sample_name": {}, "collection_date": {}}"#).unwrap();
        let source = StaticSource::new(vec![
            record(&[("sample_name", "S1"), ("collection_date", "2023-01-01")]),
            record(&[("sample_name", "S1"), ("collection_date", "2023-02-01")]),
        ]);

        let result = Samplemap::new(mapper)
            .export(&source, "sub-1", &ExportOptions::new("sample_name"))
            .unwrap();

        assert_eq!(result.table.header, None);
        assert_eq!(result.table.rows, vec![vec!["S1", "2023-02-01"]]);
        assert_eq!(result.summary.records_fetched, 2);
        assert_eq!(result.summary.rows_exported, 1);
        assert_eq!(result.summary.duplicates_dropped, 1);
    }

    #[test]
    fn test_export_with_header_row() {
        let mapper =
            MapperConfig::from_json(r#"{"sample_name": {"header": "Sample Name"}}"#).unwrap();
        let source = StaticSource::new(vec![record(&[("sample_name", "S1")])]);

        let result = Samplemap::new(mapper)
            .export(
                &source,
                "sub-1",
                &ExportOptions::new("sample_name").with_header(),
            )
            .unwrap();

        assert_eq!(result.table.header.as_ref().unwrap()[0], "Sample Name");
    }

    #[test]
    fn test_unknown_unique_field_fails_before_fetch() {
        let mapper = MapperConfig::from_json(r#"{"sample_name": {}}"#).unwrap();
        // An empty StaticSource would fail the fetch; the unique-field check
        // must come first.
        let source = StaticSource::default();

        let err = Samplemap::new(mapper)
            .export(&source, "sub-1", &ExportOptions::new("nope"))
            .unwrap_err();

        assert!(matches!(
            err,
            SamplemapError::Config(ConfigError::UnknownUniqueField(_))
        ));
    }
}
