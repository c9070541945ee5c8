//! Positional variant detection
//!
//! Diffs two equal-length aligned sequences index-by-index.

use seqfind_common::{Result, SeqfindError};
use serde::{Deserialize, Serialize};

/// A single positional mismatch between aligned query and subject sequences
///
/// `position` is 1-based; `original` is the subject (reference) residue and
/// `variation` the query residue at that position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub position: u32,
    pub original: char,
    pub variation: char,
}

/// Compare the aligned query and subject sequences and return one `Variant`
/// per index where they differ.
///
/// Both sequences must have identical length; anything else is an input
/// error. Returns an empty list when the sequences are identical.
pub fn detect_variants(query: &str, subject: &str) -> Result<Vec<Variant>> {
    let query_chars: Vec<char> = query.chars().collect();
    let subject_chars: Vec<char> = subject.chars().collect();

    if query_chars.len() != subject_chars.len() {
        return Err(SeqfindError::validation(format!(
            "Aligned sequences have different lengths ({} vs {})",
            query_chars.len(),
            subject_chars.len()
        )));
    }

    let variants = query_chars
        .iter()
        .zip(subject_chars.iter())
        .enumerate()
        .filter(|(_, (q, s))| q != s)
        .map(|(i, (q, s))| Variant {
            position: i as u32 + 1,
            original: *s,
            variation: *q,
        })
        .collect();

    Ok(variants)
}
