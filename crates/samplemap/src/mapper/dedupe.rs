//! Deduplication of resolved rows by the unique-field value.

use std::collections::HashMap;

use super::engine::OutputRow;

/// Collapse rows sharing a unique-key value, keeping the last occurrence.
///
/// Input order is record order, so a later portal edit to the same sample
/// supersedes earlier ones within the extraction. Rows with a blank key are
/// never deduplicated against each other: absence of a key is not evidence
/// of identity, so every keyless row survives.
pub fn dedupe(rows: Vec<OutputRow>) -> Vec<OutputRow> {
    let mut last_for_key: HashMap<&str, usize> = HashMap::new();
    for (index, row) in rows.iter().enumerate() {
        if let Some(key) = row.key.as_deref() {
            last_for_key.insert(key, index);
        }
    }

    let survivors: Vec<bool> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| match row.key.as_deref() {
            Some(key) => last_for_key[key] == index,
            None => true,
        })
        .collect();

    rows.into_iter()
        .zip(survivors)
        .filter_map(|(row, keep)| keep.then_some(row))
        .collect()
}
