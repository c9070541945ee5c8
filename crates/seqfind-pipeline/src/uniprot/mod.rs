//! UniProtKB annotation client
//!
//! Fetches the structured annotation document for an accession and extracts
//! the protein profile and variant-linked diseases from it.
//!
//! API documentation: <https://www.ebi.ac.uk/proteins/api/doc/>

pub mod disease;
pub mod types;

pub use disease::{extract_diseases, extract_profile, DiseaseMatch, ProteinProfile};
pub use types::AnnotationRecord;

use crate::config::PipelineConfig;
use reqwest::Client;
use seqfind_common::{Result, SeqfindError};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "UniProtKB";

/// Client for the remote protein-annotation service
pub struct AnnotationClient {
    client: Client,
    base_url: String,
}

impl AnnotationClient {
    /// Create a new annotation client
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        Ok(Self {
            client,
            base_url: config.uniprot_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the annotation record for an accession
    ///
    /// An empty accession is rejected before any network call.
    pub async fn fetch_annotation(&self, accession: &str) -> Result<AnnotationRecord> {
        if accession.trim().is_empty() {
            return Err(SeqfindError::validation(
                "An accession is required to fetch protein annotation",
            ));
        }

        debug!(accession = %accession, "Fetching annotation record");

        let response = self
            .client
            .get(format!("{}/{}.json", self.base_url, accession))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(SeqfindError::remote(
                SERVICE,
                format!(
                    "annotation fetch for '{}' returned status {}",
                    accession,
                    response.status()
                ),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        serde_json::from_str(&body).map_err(|e| SeqfindError::decode(SERVICE, e))
    }
}
