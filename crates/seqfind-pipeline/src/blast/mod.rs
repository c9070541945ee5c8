//! EBI NCBI-BLAST similarity-search client
//!
//! Submits a sequence-search job to the EBI REST service, polls the job
//! status with exponential backoff until a terminal state, then fetches the
//! structured JSON result document.
//!
//! API documentation:
//! <https://www.ebi.ac.uk/seqdb/confluence/pages/viewpage.action?pageId=94147939>

pub mod hit;
pub mod poll;

pub use hit::{select_hit, Hit, Hsp, SearchHit, SearchResult};
pub use poll::{Backoff, JobStatus};

use crate::config::{PipelineConfig, PollConfig};
use reqwest::Client;
use seqfind_common::sequence::{is_valid_sequence, validate_contact_email, SequenceKind};
use seqfind_common::{Result, SeqfindError};
use std::time::Duration;
use tracing::{debug, info, warn};

const SERVICE: &str = "EBI NCBI-BLAST";

/// BLAST program used to perform the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Blastn,
    Blastp,
    Blastx,
    Tblastn,
    Tblastx,
}

impl Program {
    pub fn as_str(self) -> &'static str {
        match self {
            Program::Blastn => "blastn",
            Program::Blastp => "blastp",
            Program::Blastx => "blastx",
            Program::Tblastn => "tblastn",
            Program::Tblastx => "tblastx",
        }
    }

    /// Alphabet the query sequence must use for this program
    pub fn query_kind(self) -> SequenceKind {
        match self {
            Program::Blastp | Program::Tblastn => SequenceKind::Protein,
            Program::Blastn | Program::Blastx | Program::Tblastx => SequenceKind::Nucleotide,
        }
    }

    /// Value of the `stype` submission field
    pub fn sequence_type(self) -> &'static str {
        match self.query_kind() {
            SequenceKind::Protein => "protein",
            SequenceKind::Nucleotide => "dna",
        }
    }
}

impl std::str::FromStr for Program {
    type Err = SeqfindError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "blastn" => Ok(Program::Blastn),
            "blastp" => Ok(Program::Blastp),
            "blastx" => Ok(Program::Blastx),
            "tblastn" => Ok(Program::Tblastn),
            "tblastx" => Ok(Program::Tblastx),
            _ => Err(SeqfindError::validation(format!(
                "Unknown BLAST program '{}'",
                s
            ))),
        }
    }
}

/// Scoring matrix used in the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matrix {
    Blosum45,
    Blosum50,
    Blosum62,
    Blosum80,
    Blosum90,
    Pam30,
    Pam70,
    Pam250,
}

impl Matrix {
    pub fn as_str(self) -> &'static str {
        match self {
            Matrix::Blosum45 => "BLOSUM45",
            Matrix::Blosum50 => "BLOSUM50",
            Matrix::Blosum62 => "BLOSUM62",
            Matrix::Blosum80 => "BLOSUM80",
            Matrix::Blosum90 => "BLOSUM90",
            Matrix::Pam30 => "PAM30",
            Matrix::Pam70 => "PAM70",
            Matrix::Pam250 => "PAM250",
        }
    }
}

impl std::str::FromStr for Matrix {
    type Err = SeqfindError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "BLOSUM45" => Ok(Matrix::Blosum45),
            "BLOSUM50" => Ok(Matrix::Blosum50),
            "BLOSUM62" => Ok(Matrix::Blosum62),
            "BLOSUM80" => Ok(Matrix::Blosum80),
            "BLOSUM90" => Ok(Matrix::Blosum90),
            "PAM30" => Ok(Matrix::Pam30),
            "PAM70" => Ok(Matrix::Pam70),
            "PAM250" => Ok(Matrix::Pam250),
            _ => Err(SeqfindError::validation(format!(
                "Unknown scoring matrix '{}'",
                s
            ))),
        }
    }
}

/// Tunable submission parameters with the service's fixed default table
#[derive(Debug, Clone)]
pub struct BlastParams {
    pub program: Program,
    pub matrix: Matrix,
    /// Maximum number of alignments displayed in the output
    pub alignments: u32,
    /// Maximum number of scores displayed in the output
    pub scores: u32,
    /// E-value threshold
    pub exp: String,
    /// Amount the score must drop before extension of hits is halted
    pub dropoff: u32,
    /// Match/miss-match scores for nucleotide searches
    pub match_scores: String,
    /// Penalty for the initiation of a gap
    pub gapopen: i32,
    /// Penalty for each base/residue in a gap
    pub gapext: i32,
    /// Low complexity sequence filter flag
    pub filter: String,
    /// Region of the query sequence to use for the search
    pub seqrange: String,
    /// Perform gapped alignments
    pub gapalign: bool,
    /// Compositional adjustment or statistics mode
    pub compstats: String,
    /// Alignment format used in the output
    pub align: u32,
    /// Target database name
    pub database: String,
}

impl Default for BlastParams {
    fn default() -> Self {
        Self {
            program: Program::Blastp,
            matrix: Matrix::Blosum62,
            alignments: 50,
            scores: 5,
            exp: "1e-3".to_string(),
            dropoff: 0,
            match_scores: "50".to_string(),
            gapopen: -1,
            gapext: -1,
            filter: "F".to_string(),
            seqrange: "START-END".to_string(),
            gapalign: true,
            compstats: "F".to_string(),
            align: 0,
            database: "uniprotkb_refprotswissprot".to_string(),
        }
    }
}

/// Client for the EBI similarity-search REST service
pub struct BlastClient {
    client: Client,
    base_url: String,
    contact_email: String,
    poll: PollConfig,
}

impl BlastClient {
    /// Create a new similarity-search client
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        Ok(Self {
            client,
            base_url: config.ebi_blast_url.trim_end_matches('/').to_string(),
            contact_email: config.contact_email.clone(),
            poll: config.poll,
        })
    }

    /// Submit a search job and return the opaque job identifier
    ///
    /// The contact address and the query alphabet are validated first;
    /// a validation failure never reaches the network.
    pub async fn submit(&self, params: &BlastParams, sequence: &str) -> Result<String> {
        validate_contact_email(&self.contact_email)?;

        let kind = params.program.query_kind();
        if !is_valid_sequence(sequence, kind) {
            return Err(SeqfindError::validation(format!(
                "Query sequence is not valid {} input for program {}",
                kind,
                params.program.as_str()
            )));
        }

        let form = [
            ("email", self.contact_email.clone()),
            ("program", params.program.as_str().to_string()),
            ("matrix", params.matrix.as_str().to_string()),
            ("alignments", params.alignments.to_string()),
            ("scores", params.scores.to_string()),
            ("exp", params.exp.clone()),
            ("dropoff", params.dropoff.to_string()),
            ("match_scores", params.match_scores.clone()),
            ("gapopen", params.gapopen.to_string()),
            ("gapext", params.gapext.to_string()),
            ("filter", params.filter.clone()),
            ("seqrange", params.seqrange.clone()),
            ("gapalign", params.gapalign.to_string()),
            ("compstats", params.compstats.clone()),
            ("align", params.align.to_string()),
            ("stype", params.program.sequence_type().to_string()),
            ("sequence", format!(">query\n{}", sequence)),
            ("database", params.database.clone()),
        ];

        let response = self
            .client
            .post(format!("{}/run", self.base_url))
            .form(&form)
            .send()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(SeqfindError::remote(
                SERVICE,
                format!("job submission returned status {}", response.status()),
            ));
        }

        let job_id = response
            .text()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?
            .trim()
            .to_string();

        if job_id.is_empty() {
            return Err(SeqfindError::decode(SERVICE, "empty job identifier"));
        }

        info!(job_id = %job_id, program = params.program.as_str(), "Submitted similarity-search job");
        Ok(job_id)
    }

    /// Poll the current status of a job
    pub async fn status(&self, job_id: &str) -> Result<JobStatus> {
        let response = self
            .client
            .get(format!("{}/status/{}", self.base_url, job_id))
            .send()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(SeqfindError::remote(
                SERVICE,
                format!("status poll returned status {}", response.status()),
            ));
        }

        let token = response
            .text()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        Ok(JobStatus::from_token(token.trim()))
    }

    /// Fetch the structured JSON result of a finished job
    pub async fn fetch_result(&self, job_id: &str) -> Result<SearchResult> {
        let response = self
            .client
            .get(format!("{}/result/{}/json", self.base_url, job_id))
            .send()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(SeqfindError::remote(
                SERVICE,
                format!("result fetch returned status {}", response.status()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SeqfindError::remote(SERVICE, e))?;

        serde_json::from_str(&body).map_err(|e| SeqfindError::decode(SERVICE, e))
    }

    /// Wait until a job reaches a terminal state
    ///
    /// Sleeps between polls following the backoff schedule: the interval
    /// starts at the configured base, doubles after each RUNNING observation
    /// and is capped at the maximum. Unrecognized status tokens are treated
    /// as transient and re-polled at the current interval. The loop is
    /// bounded by the configured attempt budget.
    pub async fn wait_until_finished(&self, job_id: &str) -> Result<()> {
        let mut backoff = Backoff::new(&self.poll);

        for attempt in 1..=self.poll.max_attempts {
            match self.status(job_id).await? {
                JobStatus::Finished => {
                    info!(job_id = %job_id, attempt, "Similarity-search job finished");
                    return Ok(());
                },
                JobStatus::Failed(status) => {
                    return Err(SeqfindError::JobFailed(status));
                },
                JobStatus::Running => {
                    let delay = backoff.next_after_running();
                    debug!(job_id = %job_id, attempt, delay_secs = delay.as_secs(), "Job still running");
                    tokio::time::sleep(delay).await;
                },
                JobStatus::Transient(token) => {
                    let delay = backoff.current();
                    warn!(job_id = %job_id, attempt, token = %token, "Unrecognized job status, re-polling");
                    tokio::time::sleep(delay).await;
                },
            }
        }

        Err(SeqfindError::Timeout {
            attempts: self.poll.max_attempts,
        })
    }

    /// Submit a job, wait for completion and fetch the result document
    pub async fn submit_and_wait(
        &self,
        params: &BlastParams,
        sequence: &str,
    ) -> Result<SearchResult> {
        let job_id = self.submit(params, sequence).await?;
        self.wait_until_finished(&job_id).await?;
        self.fetch_result(&job_id).await
    }
}
