//! In-memory record source for tests and offline runs.

use crate::error::{Result, SamplemapError};

use super::record::SampleRecord;
use super::RecordSource;

/// A record source backed by a fixed list of records.
///
/// Useful for exercising the mapping pipeline without a portal, and as the
/// test double for anything taking a [`RecordSource`].
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<SampleRecord>,
}

impl StaticSource {
    /// Create a source yielding the given records, in order.
    pub fn new(records: Vec<SampleRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticSource {
    fn fetch(&self, submission_id: &str) -> Result<Vec<SampleRecord>> {
        if self.records.is_empty() {
            return Err(SamplemapError::SourceUnavailable(format!(
                "no records for submission '{}'",
                submission_id
            )));
        }
        Ok(self.records.clone())
    }
}
