//! seqfind - sequence annotation pipeline CLI

mod fasta;

use anyhow::Result;
use clap::Parser;
use seqfind_common::logging::{init_logging, LogConfig, LogLevel};
use seqfind_pipeline::config::PipelineConfig;
use seqfind_pipeline::drugbank::DrugStore;
use seqfind_pipeline::expasy::TranslateClient;
use seqfind_pipeline::orf::longest_orf;
use seqfind_pipeline::pipeline::Pipeline;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "seqfind")]
#[command(author, version, about = "Annotate a nucleotide sequence via translation, similarity search, disease evidence and drug lookup")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the full annotation pipeline on a FASTA file
    Annotate {
        /// FASTA file with the nucleotide sequence
        fasta: PathBuf,

        /// Contact email sent with the similarity-search submission
        #[arg(short, long, env = "SEQFIND_CONTACT_EMAIL")]
        email: Option<String>,
    },

    /// Translate a FASTA file and report the longest open reading frame
    Translate {
        /// FASTA file with the nucleotide sequence
        fasta: PathBuf,
    },

    /// Look up approved drugs for one or more disease names
    Drugs {
        /// Disease names to match against the local DrugBank store
        #[arg(required = true)]
        diseases: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let log_config = LogConfig::from_env()
        .unwrap_or_default()
        .with_level(log_level)
        .with_file_prefix("seqfind");
    init_logging(&log_config)?;

    let mut config = PipelineConfig::load()?;

    match cli.command {
        Command::Annotate { fasta, email } => {
            if let Some(email) = email {
                config.contact_email = email;
            }
            let sequence = fasta::read_nucleotide_record(&fasta)?;
            info!(file = %fasta.display(), len = sequence.len(), "Running annotation pipeline");

            let pipeline = Pipeline::new(config)?;
            let result = pipeline.run(&sequence).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        },
        Command::Translate { fasta } => {
            let sequence = fasta::read_nucleotide_record(&fasta)?;
            info!(file = %fasta.display(), len = sequence.len(), "Translating sequence");

            let client = TranslateClient::new(&config)?;
            let protein = client.translate(&sequence).await?;
            let orf = longest_orf(&protein);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "protein": protein,
                    "bigORF": if orf.is_empty() { None } else { Some(orf) },
                }))?
            );
        },
        Command::Drugs { diseases } => {
            info!(count = diseases.len(), "Looking up drugs");

            let store = DrugStore::new(config.drugbank_db_path);
            let drugs = store.find_drugs(&diseases)?;
            println!("{}", serde_json::to_string_pretty(&drugs)?);
        },
    }

    Ok(())
}
