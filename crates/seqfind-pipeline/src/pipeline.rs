//! Pipeline orchestrator
//!
//! Runs the stages in order: translate -> ORF -> similarity search -> hit
//! selection and variant detection -> annotation and disease extraction ->
//! drug lookup. A stage that yields nothing leaves its result slot absent
//! and short-circuits everything downstream; a stage that fails aborts the
//! whole run. Partial results are never mixed with a failure.

use crate::blast::{select_hit, BlastClient, BlastParams};
use crate::config::PipelineConfig;
use crate::drugbank::{DrugRecord, DrugStore};
use crate::expasy::TranslateClient;
use crate::orf::longest_orf;
use crate::uniprot::{
    extract_diseases, extract_profile, AnnotationClient, DiseaseMatch, ProteinProfile,
};
use crate::variant::{detect_variants, Variant};
use seqfind_common::sequence::{is_valid_sequence, SequenceKind};
use seqfind_common::{Result, SeqfindError};
use serde::Serialize;
use tracing::info;

/// Translation stage output
#[derive(Debug, Clone, Serialize)]
pub struct TranslationReport {
    /// Raw multi-frame protein text from the translation service
    pub protein: String,
    /// Longest open reading frame, absent when none was found
    #[serde(rename = "bigORF")]
    pub big_orf: Option<String>,
}

/// Similarity-search stage output
#[derive(Debug, Clone, Serialize)]
pub struct BlastReport {
    pub hit_id: String,
    pub hit_def: String,
    pub hit_acc: String,
    pub hit_uni_de: Option<String>,
    pub hit_uni_os: Option<String>,
    pub hsp_gaps: u32,
    pub hsp_align_len: u32,
    pub hsp_qseq: String,
    pub hsp_hseq: String,
    pub variants: Vec<Variant>,
}

/// Annotation stage output
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationReport {
    #[serde(flatten)]
    pub profile: ProteinProfile,
    pub diseases: Vec<DiseaseMatch>,
}

/// Aggregate result of one pipeline invocation
///
/// Each slot is `None` when its stage (or any earlier stage) produced
/// nothing; absence is distinguishable from populated-but-empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineResult {
    pub expasy: Option<TranslationReport>,
    pub blast: Option<BlastReport>,
    pub uniprot: Option<AnnotationReport>,
    pub drugbank: Option<Vec<DrugRecord>>,
}

/// The sequence-annotation pipeline
pub struct Pipeline {
    config: PipelineConfig,
    translate: TranslateClient,
    blast: BlastClient,
    annotation: AnnotationClient,
    drugs: DrugStore,
}

impl Pipeline {
    /// Build a pipeline from a configuration
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let translate = TranslateClient::new(&config)?;
        let blast = BlastClient::new(&config)?;
        let annotation = AnnotationClient::new(&config)?;
        let drugs = DrugStore::new(config.drugbank_db_path.clone());

        Ok(Self {
            config,
            translate,
            blast,
            annotation,
            drugs,
        })
    }

    /// Run the full pipeline on a raw nucleotide sequence
    pub async fn run(&self, sequence: &str) -> Result<PipelineResult> {
        if !is_valid_sequence(sequence, SequenceKind::Nucleotide) {
            return Err(SeqfindError::validation(
                "Input is not a valid nucleotide sequence (letters A, C, G, T)",
            ));
        }

        let mut result = PipelineResult::default();

        // Stage 1: translation
        let protein = self.translate.translate(sequence).await?;
        if protein.is_empty() {
            info!("Translation produced no protein text, stopping");
            return Ok(result);
        }

        // Stage 2: longest open reading frame
        let orf = longest_orf(&protein);
        if orf.is_empty() {
            info!("No open reading frame found, stopping");
            result.expasy = Some(TranslationReport {
                protein,
                big_orf: None,
            });
            return Ok(result);
        }
        info!(orf_len = orf.len(), "Extracted longest open reading frame");
        result.expasy = Some(TranslationReport {
            protein,
            big_orf: Some(orf.clone()),
        });

        // Stage 3: similarity search
        let params = BlastParams::default();
        let document = self.blast.submit_and_wait(&params, &orf).await?;

        // Stage 4: hit selection and variant detection
        let Some(hit) = select_hit(
            &document,
            &self.config.target_organism,
            &self.config.target_database,
        ) else {
            info!("No acceptable similarity-search hit, stopping");
            return Ok(result);
        };
        info!(accession = %hit.accession, "Selected similarity-search hit");

        let variants = detect_variants(&hit.query_aligned, &hit.subject_aligned)?;
        result.blast = Some(BlastReport {
            hit_id: hit.hit_id,
            hit_def: hit.hit_def,
            hit_acc: hit.accession.clone(),
            hit_uni_de: hit.description,
            hit_uni_os: hit.organism,
            hsp_gaps: hit.gaps,
            hsp_align_len: hit.align_len,
            hsp_qseq: hit.query_aligned,
            hsp_hseq: hit.subject_aligned,
            variants: variants.clone(),
        });
        if variants.is_empty() {
            info!("Aligned sequences are identical, stopping");
            return Ok(result);
        }
        info!(variant_count = variants.len(), "Detected sequence variants");

        // Stage 5: annotation and disease extraction
        let record = self.annotation.fetch_annotation(&hit.accession).await?;
        let profile = extract_profile(&record);
        let diseases = extract_diseases(&record, &variants);
        let disease_names: Vec<String> =
            diseases.iter().map(|d| d.disease_id.clone()).collect();
        result.uniprot = Some(AnnotationReport { profile, diseases });
        if disease_names.is_empty() {
            info!("No disease evidence matched the variants, stopping");
            return Ok(result);
        }
        info!(disease_count = disease_names.len(), "Matched annotated diseases");

        // Stage 6: drug lookup
        let drugs = self.drugs.find_drugs(&disease_names)?;
        info!(drug_count = drugs.len(), "Pipeline complete");
        result.drugbank = Some(drugs);

        Ok(result)
    }
}
