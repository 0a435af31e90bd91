//! Submission portal API client.
//!
//! The portal exposes a refresh-token exchange (`POST /auth/refresh`) and a
//! submission endpoint (`GET /api/metadata_submission/{id}`). The submission
//! body carries `metadata_submission.sampleData`: a map from tab key to a
//! list of row objects. One tab per user facility holds the facility-specific
//! fields; the remaining tabs (soil, water, plant_associated, ...) hold the
//! environment fields and are joined onto the facility rows by `samp_name`.

use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SamplemapError};

use super::record::SampleRecord;
use super::RecordSource;

/// Environment variable holding the portal base URL.
pub const ENV_BASE_URL: &str = "SUBMISSION_PORTAL_BASE_URL";
/// Environment variable holding the portal refresh token.
pub const ENV_REFRESH_TOKEN: &str = "DATA_PORTAL_REFRESH_TOKEN";

/// Tab keys reserved for user facilities.
const FACILITY_DATA_KEYS: &[&str] = &["emsl_data", "jgi_mg_data", "jgi_mt_data"];

/// Field joining environment tabs onto facility rows.
const SAMPLE_NAME_FIELD: &str = "samp_name";

/// Field recording which environment tab a row matched.
const ISOLATED_FROM_FIELD: &str = "sample_isolated_from";

/// Downstream user facility whose tab is extracted from a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFacility {
    /// Environmental Molecular Sciences Laboratory.
    Emsl,
    /// JGI metagenomics.
    JgiMg,
    /// JGI metatranscriptomics.
    JgiMt,
}

impl UserFacility {
    /// The submission tab key holding this facility's sample data.
    pub fn data_key(&self) -> &'static str {
        match self {
            UserFacility::Emsl => "emsl_data",
            UserFacility::JgiMg => "jgi_mg_data",
            UserFacility::JgiMt => "jgi_mt_data",
        }
    }
}

impl std::str::FromStr for UserFacility {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "emsl" => Ok(UserFacility::Emsl),
            "jgi_mg" => Ok(UserFacility::JgiMg),
            "jgi_mt" => Ok(UserFacility::JgiMt),
            _ => Err(format!(
                "Unknown user facility: {}. Use: emsl, jgi_mg, or jgi_mt.",
                s
            )),
        }
    }
}

impl std::fmt::Display for UserFacility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserFacility::Emsl => write!(f, "emsl"),
            UserFacility::JgiMg => write!(f, "jgi_mg"),
            UserFacility::JgiMt => write!(f, "jgi_mt"),
        }
    }
}

/// Blocking client for the submission portal.
pub struct PortalClient {
    client: reqwest::blocking::Client,
    base_url: String,
    refresh_token: String,
    facility: UserFacility,
}

impl PortalClient {
    /// Create a client with explicit credentials.
    pub fn new(
        base_url: impl Into<String>,
        refresh_token: impl Into<String>,
        facility: UserFacility,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| {
                SamplemapError::SourceUnavailable(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            refresh_token: refresh_token.into(),
            facility,
        })
    }

    /// Create a client from `SUBMISSION_PORTAL_BASE_URL` and
    /// `DATA_PORTAL_REFRESH_TOKEN`.
    pub fn from_env(facility: UserFacility) -> Result<Self> {
        let base_url = std::env::var(ENV_BASE_URL).map_err(|_| {
            SamplemapError::SourceUnavailable(format!(
                "{} environment variable not set",
                ENV_BASE_URL
            ))
        })?;
        let refresh_token = std::env::var(ENV_REFRESH_TOKEN).map_err(|_| {
            SamplemapError::SourceUnavailable(format!(
                "{} environment variable not set",
                ENV_REFRESH_TOKEN
            ))
        })?;

        Self::new(base_url, refresh_token, facility)
    }

    /// Exchange the refresh token for an access token.
    fn refresh_access_token(&self) -> Result<String> {
        let response = self
            .client
            .post(format!("{}/auth/refresh", self.base_url))
            .json(&serde_json::json!({ "refresh_token": self.refresh_token }))
            .send()
            .map_err(|e| {
                SamplemapError::SourceUnavailable(format!("token refresh failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(SamplemapError::SourceUnavailable(format!(
                "token refresh failed ({})",
                response.status()
            )));
        }

        let body: RefreshResponse = response.json().map_err(|e| {
            SamplemapError::SourceUnavailable(format!("malformed token response: {}", e))
        })?;

        Ok(body.access_token)
    }
}

impl RecordSource for PortalClient {
    fn fetch(&self, submission_id: &str) -> Result<Vec<SampleRecord>> {
        let access_token = self.refresh_access_token()?;

        let response = self
            .client
            .get(format!(
                "{}/api/metadata_submission/{}",
                self.base_url, submission_id
            ))
            .bearer_auth(access_token)
            .send()
            .map_err(|e| {
                SamplemapError::SourceUnavailable(format!(
                    "submission '{}' request failed: {}",
                    submission_id, e
                ))
            })?;

        if !response.status().is_success() {
            return Err(SamplemapError::SourceUnavailable(format!(
                "submission '{}' request failed ({})",
                submission_id,
                response.status()
            )));
        }

        let body: SubmissionResponse = response.json().map_err(|e| {
            SamplemapError::SourceUnavailable(format!(
                "malformed submission '{}' response: {}",
                submission_id, e
            ))
        })?;

        extract_records(
            &body.metadata_submission.sample_data,
            self.facility,
            submission_id,
        )
    }
}

/// Tab key → list of row objects, as returned by the portal.
type SampleData = IndexMap<String, Vec<IndexMap<String, Value>>>;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SubmissionResponse {
    metadata_submission: MetadataSubmission,
}

#[derive(Debug, Deserialize)]
struct MetadataSubmission {
    #[serde(rename = "sampleData", default)]
    sample_data: SampleData,
}

/// Build records from a submission's sample data: the facility tab first,
/// then environment tabs merged in by sample name.
fn extract_records(
    sample_data: &SampleData,
    facility: UserFacility,
    submission_id: &str,
) -> Result<Vec<SampleRecord>> {
    let rows = sample_data
        .get(facility.data_key())
        .filter(|rows| !rows.is_empty())
        .ok_or_else(|| {
            SamplemapError::SourceUnavailable(format!(
                "no '{}' records in submission '{}'",
                facility.data_key(),
                submission_id
            ))
        })?;

    let mut records: Vec<SampleRecord> = rows.iter().map(row_to_record).collect();

    for (tab_key, tab_rows) in sample_data {
        if FACILITY_DATA_KEYS.contains(&tab_key.as_str()) {
            continue;
        }
        merge_environment_tab(&mut records, tab_key, tab_rows);
    }

    Ok(records)
}

/// Left-join one environment tab onto the facility records by `samp_name`.
/// Fields already present on a record are not overwritten; matched records
/// gain `sample_isolated_from` with the tab key.
fn merge_environment_tab(
    records: &mut [SampleRecord],
    tab_key: &str,
    tab_rows: &[IndexMap<String, Value>],
) {
    let by_name: IndexMap<String, &IndexMap<String, Value>> = tab_rows
        .iter()
        .filter_map(|row| {
            row.get(SAMPLE_NAME_FIELD)
                .map(|v| (value_to_string(v), row))
        })
        .collect();

    for record in records.iter_mut() {
        let Some(name) = record.get(SAMPLE_NAME_FIELD).map(str::to_string) else {
            continue;
        };
        let Some(env_row) = by_name.get(&name) else {
            continue;
        };

        for (field, value) in env_row.iter() {
            if !record.contains(field) {
                record.insert(field.clone(), value_to_string(value));
            }
        }
        record.insert(ISOLATED_FROM_FIELD, tab_key);
    }
}

fn row_to_record(row: &IndexMap<String, Value>) -> SampleRecord {
    row.iter()
        .map(|(field, value)| (field.clone(), value_to_string(value)))
        .collect()
}

/// String representation of a portal value. Null becomes the empty string;
/// anything non-string keeps its JSON rendering.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
