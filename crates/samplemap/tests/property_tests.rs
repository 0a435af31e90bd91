//! Property-based tests for the mapping engine and deduplication.
//!
//! These verify the pipeline's core invariants under arbitrary inputs:
//!
//! 1. **No panics**: resolution never crashes on any record
//! 2. **Determinism**: same input always produces the same row
//! 3. **Shape**: every row has exactly one cell per configured column
//! 4. **Dedup invariants**: keyed rows end up unique, keyless rows survive

use proptest::prelude::*;

use samplemap::{dedupe, MapperConfig, MappingEngine, OutputRow, SampleRecord};

/// Field names drawn from a small pool so records sometimes hit the
/// configured columns and sometimes miss them entirely.
fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("sample_name".to_string()),
        Just("collection_date".to_string()),
        Just("depth".to_string()),
        Just("minimum_depth".to_string()),
        Just("lat_lon".to_string()),
        "[a-z_]{1,12}",
    ]
}

fn field_value() -> impl Strategy<Value = String> {
    "[ -~]{0,20}"
}

fn arbitrary_record() -> impl Strategy<Value = SampleRecord> {
    prop::collection::vec((field_name(), field_value()), 0..8)
        .prop_map(|fields| fields.into_iter().collect())
}

fn test_config() -> MapperConfig {
    MapperConfig::from_json(
        r#"{
            "sample_name": {"header": "Sample Name"},
            "collection_date": {},
            "depth": {"1": "minimum_depth"},
            "latitude": {"sub_port_mapping": {"lat_lon": "latitude"}}
        }"#,
    )
    .unwrap()
}

proptest! {
    #[test]
    fn resolution_never_panics_and_keeps_shape(record in arbitrary_record()) {
        let config = test_config();
        let engine = MappingEngine::new(&config, "sample_name").unwrap();

        let row = engine.resolve(&record);
        prop_assert_eq!(row.cells.len(), config.column_count());
    }

    #[test]
    fn resolution_is_deterministic(record in arbitrary_record()) {
        let config = test_config();
        let engine = MappingEngine::new(&config, "sample_name").unwrap();

        prop_assert_eq!(engine.resolve(&record), engine.resolve(&record));
    }

    #[test]
    fn missing_fields_resolve_blank_never_error(record in arbitrary_record()) {
        let config = test_config();
        let engine = MappingEngine::new(&config, "sample_name").unwrap();

        let row = engine.resolve(&record);
        for (spec, cell) in config.columns().zip(&row.cells) {
            let expected = spec
                .sub_port_mapping
                .as_ref()
                .and_then(|m| m.keys().find_map(|k| record.get(k)))
                .or_else(|| record.get(&spec.name))
                .unwrap_or("");
            prop_assert_eq!(cell.as_str(), expected);
        }
    }

    #[test]
    fn dedupe_leaves_keys_unique_and_keyless_rows_alone(
        records in prop::collection::vec(arbitrary_record(), 0..20)
    ) {
        let config = test_config();
        let engine = MappingEngine::new(&config, "sample_name").unwrap();

        let rows: Vec<OutputRow> = records.iter().map(|r| engine.resolve(r)).collect();
        let keyless_in = rows.iter().filter(|r| r.key.is_none()).count();

        let deduped = dedupe(rows);

        let keyless_out = deduped.iter().filter(|r| r.key.is_none()).count();
        prop_assert_eq!(keyless_out, keyless_in);

        let mut keys: Vec<&str> = deduped.iter().filter_map(|r| r.key.as_deref()).collect();
        let total_keys = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), total_keys);
    }
}
