//! Search result document and hit selection
//!
//! Serde model of the EBI JSON result and the rule that picks the hit the
//! rest of the pipeline works with.

use serde::{Deserialize, Serialize};

/// Structured result document of a finished search job
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// One candidate match record returned by the service
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    pub hit_id: String,
    pub hit_def: String,
    pub hit_acc: String,
    /// Database tag, present in result shapes without UniProt cross-references
    #[serde(default)]
    pub hit_db: Option<String>,
    /// UniProt description cross-reference
    #[serde(default)]
    pub hit_uni_de: Option<String>,
    /// UniProt organism cross-reference
    #[serde(default)]
    pub hit_uni_os: Option<String>,
    #[serde(default)]
    pub hit_hsps: Vec<Hsp>,
}

/// High-scoring segment pair: one alignment sub-record
#[derive(Debug, Clone, Deserialize)]
pub struct Hsp {
    #[serde(default)]
    pub hsp_gaps: u32,
    #[serde(default)]
    pub hsp_align_len: u32,
    pub hsp_qseq: String,
    pub hsp_hseq: String,
}

/// The hit selected for downstream enrichment
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub hit_id: String,
    pub hit_def: String,
    /// Accession with any isoform suffix stripped
    pub accession: String,
    pub description: Option<String>,
    pub organism: Option<String>,
    pub gaps: u32,
    pub align_len: u32,
    /// Aligned query substring
    pub query_aligned: String,
    /// Aligned subject substring
    pub subject_aligned: String,
}

/// Strip the isoform suffix from an accession (`P38398-2` -> `P38398`)
fn normalize_accession(accession: &str) -> String {
    accession
        .split('-')
        .next()
        .unwrap_or(accession)
        .to_string()
}

/// Select the best-matching hit from the result document.
///
/// Hits are scanned in service order. A hit with an organism
/// cross-reference is selected when the organism equals `target_organism`;
/// a hit without one is selected when its database tag equals
/// `target_database`. Returns `None` when nothing matches or when the
/// matching hit carries no alignment sub-record.
pub fn select_hit(
    result: &SearchResult,
    target_organism: &str,
    target_database: &str,
) -> Option<SearchHit> {
    let hit = result.hits.iter().find(|hit| match &hit.hit_uni_os {
        Some(organism) => organism == target_organism,
        None => hit.hit_db.as_deref() == Some(target_database),
    })?;

    let hsp = hit.hit_hsps.first()?;

    Some(SearchHit {
        hit_id: hit.hit_id.clone(),
        hit_def: hit.hit_def.clone(),
        accession: normalize_accession(&hit.hit_acc),
        description: hit.hit_uni_de.clone(),
        organism: hit.hit_uni_os.clone(),
        gaps: hsp.hsp_gaps,
        align_len: hsp.hsp_align_len,
        query_aligned: hsp.hsp_qseq.clone(),
        subject_aligned: hsp.hsp_hseq.clone(),
    })
}
