//! Pipeline configuration
//!
//! One `PipelineConfig` is constructed per invocation and threaded through
//! the stage clients; there are no module-level mutable globals. Defaults
//! are named constants and every value can be overridden from the
//! environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Service Endpoint Constants
// ============================================================================

/// Default ExPASy translate endpoint.
pub const DEFAULT_EXPASY_URL: &str = "https://web.expasy.org/cgi-bin/translate/dna2aa.cgi";

/// Default EBI NCBI-BLAST REST base URL. `/run`, `/status/{id}` and
/// `/result/{id}/json` are appended by the client.
pub const DEFAULT_EBI_BLAST_URL: &str = "https://www.ebi.ac.uk/Tools/services/rest/ncbiblast";

/// Default UniProtKB REST base URL.
pub const DEFAULT_UNIPROT_URL: &str = "https://rest.uniprot.org/uniprotkb";

/// Default path of the local DrugBank SQLite store.
pub const DEFAULT_DRUGBANK_DB_PATH: &str = "./data/drugbank.db";

// ============================================================================
// Selection Constants
// ============================================================================

/// Organism a similarity-search hit must match to be selected.
pub const DEFAULT_TARGET_ORGANISM: &str = "Homo sapiens";

/// Database tag used for result shapes that carry no organism field.
pub const DEFAULT_TARGET_DATABASE: &str = "SP";

// ============================================================================
// Polling Constants
// ============================================================================

/// Initial poll interval in seconds.
pub const DEFAULT_POLL_INITIAL_SECS: u64 = 10;

/// Poll interval cap in seconds.
pub const DEFAULT_POLL_MAX_SECS: u64 = 120;

/// Maximum number of status polls before giving up.
pub const DEFAULT_POLL_MAX_ATTEMPTS: u32 = 30;

/// Default timeout for individual HTTP requests in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Poll schedule for the similarity-search job
///
/// The interval starts at `initial_interval`, doubles after each RUNNING
/// observation and is capped at `max_interval`. The loop is bounded by
/// `max_attempts` so a caller-imposed deadline can always pre-empt it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(DEFAULT_POLL_INITIAL_SECS),
            max_interval: Duration::from_secs(DEFAULT_POLL_MAX_SECS),
            max_attempts: DEFAULT_POLL_MAX_ATTEMPTS,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// ExPASy translate endpoint
    pub expasy_url: String,

    /// EBI NCBI-BLAST REST base URL
    pub ebi_blast_url: String,

    /// UniProtKB REST base URL
    pub uniprot_url: String,

    /// Contact address sent with similarity-search submissions
    pub contact_email: String,

    /// Organism a hit must match to be selected
    pub target_organism: String,

    /// Database tag fallback for hit selection
    pub target_database: String,

    /// Path of the local DrugBank SQLite store
    pub drugbank_db_path: PathBuf,

    /// Poll schedule for the similarity-search job
    #[serde(skip)]
    pub poll: PollConfig,

    /// Per-request HTTP timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            expasy_url: DEFAULT_EXPASY_URL.to_string(),
            ebi_blast_url: DEFAULT_EBI_BLAST_URL.to_string(),
            uniprot_url: DEFAULT_UNIPROT_URL.to_string(),
            contact_email: String::new(),
            target_organism: DEFAULT_TARGET_ORGANISM.to_string(),
            target_database: DEFAULT_TARGET_DATABASE.to_string(),
            drugbank_db_path: PathBuf::from(DEFAULT_DRUGBANK_DB_PATH),
            poll: PollConfig::default(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment and defaults
    ///
    /// Environment variables:
    /// - `SEQFIND_EXPASY_URL`, `SEQFIND_EBI_BLAST_URL`, `SEQFIND_UNIPROT_URL`
    /// - `SEQFIND_CONTACT_EMAIL` (validated at submission time)
    /// - `SEQFIND_TARGET_ORGANISM`, `SEQFIND_TARGET_DATABASE`
    /// - `SEQFIND_DRUGBANK_DB`
    /// - `SEQFIND_POLL_INITIAL_SECS`, `SEQFIND_POLL_MAX_SECS`,
    ///   `SEQFIND_POLL_MAX_ATTEMPTS`
    /// - `SEQFIND_HTTP_TIMEOUT_SECS`
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = std::env::var("SEQFIND_EXPASY_URL") {
            config.expasy_url = url;
        }
        if let Ok(url) = std::env::var("SEQFIND_EBI_BLAST_URL") {
            config.ebi_blast_url = url;
        }
        if let Ok(url) = std::env::var("SEQFIND_UNIPROT_URL") {
            config.uniprot_url = url;
        }
        if let Ok(email) = std::env::var("SEQFIND_CONTACT_EMAIL") {
            config.contact_email = email;
        }
        if let Ok(organism) = std::env::var("SEQFIND_TARGET_ORGANISM") {
            config.target_organism = organism;
        }
        if let Ok(database) = std::env::var("SEQFIND_TARGET_DATABASE") {
            config.target_database = database;
        }
        if let Ok(path) = std::env::var("SEQFIND_DRUGBANK_DB") {
            config.drugbank_db_path = PathBuf::from(path);
        }

        config.poll.initial_interval = Duration::from_secs(
            env_u64("SEQFIND_POLL_INITIAL_SECS", DEFAULT_POLL_INITIAL_SECS),
        );
        config.poll.max_interval =
            Duration::from_secs(env_u64("SEQFIND_POLL_MAX_SECS", DEFAULT_POLL_MAX_SECS));
        config.poll.max_attempts = env_u64(
            "SEQFIND_POLL_MAX_ATTEMPTS",
            u64::from(DEFAULT_POLL_MAX_ATTEMPTS),
        ) as u32;
        config.http_timeout_secs =
            env_u64("SEQFIND_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS);

        Ok(config)
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
