//! Seqfind Pipeline Library
//!
//! Orchestrates a sequence of external bioinformatics services to enrich a
//! raw nucleotide sequence into a human-readable annotation.
//!
//! # Pipeline stages
//!
//! 1. **ExPASy translate**: nucleotide sequence -> multi-frame protein text
//! 2. **ORF extraction**: longest uninterrupted run starting at `M`
//! 3. **EBI NCBI-BLAST**: submit the ORF, poll until finished, select the
//!    best hit and diff the aligned sequences into variants
//! 4. **UniProtKB**: fetch the hit's annotation record and cross-reference
//!    variant positions against disease evidence
//! 5. **DrugBank store**: look up approved, currently-marketed drugs for the
//!    matched diseases
//!
//! Data flows strictly forward; a stage that yields nothing short-circuits
//! everything downstream.
//!
//! # Example
//!
//! ```no_run
//! use seqfind_pipeline::{config::PipelineConfig, pipeline::Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PipelineConfig::load()?;
//!     let pipeline = Pipeline::new(config)?;
//!     let result = pipeline.run("ATGGCCATTGTAATGGGCCGC").await?;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```

pub mod blast;
pub mod config;
pub mod drugbank;
pub mod expasy;
pub mod orf;
pub mod pipeline;
pub mod uniprot;
pub mod variant;
