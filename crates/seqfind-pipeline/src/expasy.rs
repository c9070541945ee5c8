//! ExPASy translate client
//!
//! Sends a nucleotide sequence to the ExPASy translate tool and returns the
//! FASTA-formatted multi-frame protein text. One outbound call, no retries.

use crate::config::PipelineConfig;
use reqwest::Client;
use seqfind_common::{Result, SeqfindError};
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "ExPASy translate";

/// Client for the remote translation service
pub struct TranslateClient {
    client: Client,
    url: String,
}

impl TranslateClient {
    /// Create a new translate client
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        Ok(Self {
            client,
            url: config.expasy_url.clone(),
        })
    }

    /// Translate a nucleotide sequence into multi-frame protein text
    ///
    /// Returns the raw FASTA body; an empty body is a valid response and is
    /// handled by the orchestrator as a short-circuit.
    pub async fn translate(&self, sequence: &str) -> Result<String> {
        debug!(len = sequence.len(), "Submitting sequence for translation");

        let response = self
            .client
            .post(&self.url)
            .form(&[("dna_sequence", sequence), ("output_format", "fasta")])
            .send()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(SeqfindError::remote(
                SERVICE,
                format!("unexpected status {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        debug!(len = body.len(), "Received translated protein text");
        Ok(body)
    }
}
