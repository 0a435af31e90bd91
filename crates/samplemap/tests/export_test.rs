//! Integration tests for the samplemap export pipeline.

use samplemap::{
    write_table, ExportOptions, MapperConfig, SampleRecord, Samplemap, SheetFormat, StaticSource,
};

/// Helper to build a record from field pairs.
fn record(fields: &[(&str, &str)]) -> SampleRecord {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn pipeline(mapper_json: &str, records: Vec<SampleRecord>) -> (Samplemap, StaticSource) {
    let mapper = MapperConfig::from_json(mapper_json).expect("mapper parse failed");
    (Samplemap::new(mapper), StaticSource::new(records))
}

// =============================================================================
// Spec Scenarios
// =============================================================================

#[test]
fn test_last_edit_supersedes_earlier_submission() {
    let (samplemap, source) = pipeline(
        r#"{"sample_name": {}, "collection_date": {}}"#,
        vec![
            record(&[("sample_name", "S1"), ("collection_date", "2023-01-01")]),
            record(&[("sample_name", "S1"), ("collection_date", "2023-02-01")]),
        ],
    );

    let result = samplemap
        .export(&source, "sub-1", &ExportOptions::new("sample_name"))
        .unwrap();

    assert_eq!(result.table.header, None);
    assert_eq!(result.table.rows, vec![vec!["S1", "2023-02-01"]]);
}

#[test]
fn test_header_row_uses_display_override() {
    let (samplemap, source) = pipeline(
        r#"{"sample_name": {"header": "Sample Name"}, "collection_date": {}}"#,
        vec![record(&[("sample_name", "S1")])],
    );

    let result = samplemap
        .export(
            &source,
            "sub-1",
            &ExportOptions::new("sample_name").with_header(),
        )
        .unwrap();

    let header = result.table.header.unwrap();
    assert_eq!(header[0], "Sample Name");
    assert_eq!(header[1], "collection_date");
}

// =============================================================================
// End-to-End Behavior
// =============================================================================

#[test]
fn test_full_layout_with_sub_headers_and_mapping() {
    let mapper = r#"{
        "sample_name": {"header": "Sample Name"},
        "depth": {
            "1": {"minimum_depth": {"header": "Min Depth"}},
            "2": {"maximum_depth": {"header": "Max Depth"}}
        },
        "latitude": {"sub_port_mapping": {"lat_lon_lat": "latitude"}}
    }"#;
    let (samplemap, source) = pipeline(
        mapper,
        vec![
            record(&[
                ("sample_name", "S1"),
                ("depth", "0 - 10"),
                ("minimum_depth", "0"),
                ("maximum_depth", "10"),
                ("lat_lon_lat", "44.05"),
            ]),
            // Missing everything but the name.
            record(&[("sample_name", "S2")]),
        ],
    );

    let result = samplemap
        .export(
            &source,
            "sub-1",
            &ExportOptions::new("sample_name").with_header(),
        )
        .unwrap();

    assert_eq!(
        result.table.header.clone().unwrap(),
        vec!["Sample Name", "depth", "Min Depth", "Max Depth", "latitude"]
    );
    assert_eq!(
        result.table.rows,
        vec![
            vec!["S1", "0 - 10", "0", "10", "44.05"],
            vec!["S2", "", "", "", ""],
        ]
    );
}

#[test]
fn test_blank_key_rows_all_retained() {
    let (samplemap, source) = pipeline(
        r#"{"sample_name": {}, "note": {}}"#,
        vec![
            record(&[("note", "a")]),
            record(&[("note", "b")]),
            record(&[("note", "c")]),
        ],
    );

    let result = samplemap
        .export(&source, "sub-1", &ExportOptions::new("sample_name"))
        .unwrap();

    assert_eq!(result.summary.rows_exported, 3);
    assert_eq!(result.summary.duplicates_dropped, 0);
}

#[test]
fn test_export_is_deterministic() {
    let mapper = r#"{"sample_name": {}, "depth": {"1": "minimum_depth"}}"#;
    let records = vec![
        record(&[("sample_name", "S1"), ("depth", "5")]),
        record(&[("sample_name", "S2"), ("minimum_depth", "0")]),
    ];

    let (samplemap_a, source_a) = pipeline(mapper, records.clone());
    let (samplemap_b, source_b) = pipeline(mapper, records);
    let options = ExportOptions::new("sample_name").with_header();

    let a = samplemap_a.export(&source_a, "sub-1", &options).unwrap();
    let b = samplemap_b.export(&source_b, "sub-1", &options).unwrap();

    assert_eq!(a.table, b.table);
}

#[test]
fn test_written_spreadsheet_matches_table() {
    let (samplemap, source) = pipeline(
        r#"{"sample_name": {"header": "Sample Name"}, "collection_date": {}}"#,
        vec![
            record(&[("sample_name", "S1"), ("collection_date", "2023-01-01")]),
            record(&[("sample_name", "S1"), ("collection_date", "2023-02-01")]),
        ],
    );

    let result = samplemap
        .export(
            &source,
            "sub-1",
            &ExportOptions::new("sample_name").with_header(),
        )
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.tsv");
    write_table(&result.table, &path, SheetFormat::Tsv).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, "Sample Name\tcollection_date\nS1\t2023-02-01\n");
}
