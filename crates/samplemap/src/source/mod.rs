//! Record sources: the submission portal client and test doubles.

mod memory;
mod portal;
mod record;

pub use memory::StaticSource;
pub use portal::{PortalClient, UserFacility, ENV_BASE_URL, ENV_REFRESH_TOKEN};
pub use record::SampleRecord;

use crate::error::Result;

/// A source of submitted sample records.
///
/// Implementations return the complete record sequence for a submission; the
/// pipeline performs no retries and imposes no timeout of its own.
pub trait RecordSource {
    /// Fetch all records for a submission, in submission order.
    fn fetch(&self, submission_id: &str) -> Result<Vec<SampleRecord>>;
}
