//! Minimal FASTA input handling
//!
//! Reads the first record of a FASTA file and validates its nucleotide
//! content before anything touches the network.

use seqfind_common::sequence::{is_valid_sequence, SequenceKind};
use seqfind_common::{Result, SeqfindError};
use std::path::Path;

/// Read the nucleotide sequence of the first FASTA record in `path`.
///
/// Header lines (`>`) and surrounding whitespace are dropped; reading stops
/// at the second header. Empty files, empty records and sequences with
/// letters outside the nucleotide alphabet are rejected.
pub fn read_nucleotide_record(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Err(SeqfindError::validation(format!(
            "FASTA file '{}' is empty",
            path.display()
        )));
    }

    let mut sequence = String::new();
    let mut headers_seen = 0;
    for line in content.lines() {
        let line = line.trim();
        if line.starts_with('>') {
            headers_seen += 1;
            if headers_seen > 1 {
                break;
            }
            continue;
        }
        sequence.push_str(line);
    }

    if sequence.is_empty() {
        return Err(SeqfindError::validation(format!(
            "FASTA file '{}' contains no sequence data",
            path.display()
        )));
    }

    if !is_valid_sequence(&sequence, SequenceKind::Nucleotide) {
        return Err(SeqfindError::validation(format!(
            "FASTA file '{}' contains letters outside the nucleotide alphabet",
            path.display()
        )));
    }

    Ok(sequence)
}
