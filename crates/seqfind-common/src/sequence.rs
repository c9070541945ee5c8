//! Sequence and input validation
//!
//! Alphabet checks for nucleotide and protein input, and contact address
//! validation for job submission. All checks are pure and run before any
//! network call; callers decide whether an invalid result is fatal.

use crate::error::{Result, SeqfindError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Legal nucleotide letters
pub const NUCLEOTIDE_ALPHABET: &str = "ACGT";

/// Extended amino-acid alphabet: the 20 standard residues plus the
/// ambiguity/rare codes B, J, O, U, X, Z and the stop marker `*`.
pub const AMINO_ACID_ALPHABET: &str = "ACDEFGHIKLMNPQRSTVWYBJOUXZ*";

/// Kind of biological sequence being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    Nucleotide,
    Protein,
}

impl SequenceKind {
    /// The alphabet legal for this kind
    pub fn alphabet(self) -> &'static str {
        match self {
            SequenceKind::Nucleotide => NUCLEOTIDE_ALPHABET,
            SequenceKind::Protein => AMINO_ACID_ALPHABET,
        }
    }
}

impl std::fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceKind::Nucleotide => write!(f, "nucleotide"),
            SequenceKind::Protein => write!(f, "protein"),
        }
    }
}

/// Check that every character of `sequence`, case-insensitively, belongs to
/// the alphabet of the declared kind. Empty input is invalid.
pub fn is_valid_sequence(sequence: &str, kind: SequenceKind) -> bool {
    if sequence.is_empty() {
        return false;
    }

    sequence
        .chars()
        .all(|c| kind.alphabet().contains(c.to_ascii_uppercase()))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Local part, one '@', domain with at least one dot. Compile of a
        // literal pattern cannot fail.
        #[allow(clippy::unwrap_used)]
        let pattern = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
        pattern
    })
}

/// Validate the contact address required by the similarity-search service.
///
/// # Rules
/// - Must not be empty (after trimming whitespace)
/// - Must match a standard address format
pub fn validate_contact_email(address: &str) -> Result<()> {
    if address.trim().is_empty() {
        return Err(SeqfindError::validation(
            "A contact email address is required for job submission",
        ));
    }

    if !email_pattern().is_match(address) {
        return Err(SeqfindError::validation(format!(
            "'{}' is not a valid contact email address",
            address
        )));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_nucleotide_sequence() {
        assert!(is_valid_sequence("ACGT", SequenceKind::Nucleotide));
        assert!(is_valid_sequence("acgtACGT", SequenceKind::Nucleotide));
    }

    #[test]
    fn test_invalid_nucleotide_sequence() {
        assert!(!is_valid_sequence("ACGU", SequenceKind::Nucleotide));
        assert!(!is_valid_sequence("ACG T", SequenceKind::Nucleotide));
        assert!(!is_valid_sequence("", SequenceKind::Nucleotide));
    }

    #[test]
    fn test_valid_protein_sequence() {
        assert!(is_valid_sequence("MKLVHS", SequenceKind::Protein));
        assert!(is_valid_sequence("mklvhs", SequenceKind::Protein));
        // Extended codes and stop marker are legal
        assert!(is_valid_sequence("MXBZJUO*", SequenceKind::Protein));
    }

    #[test]
    fn test_invalid_protein_sequence() {
        assert!(!is_valid_sequence("MKL1", SequenceKind::Protein));
        assert!(!is_valid_sequence("MK-L", SequenceKind::Protein));
        assert!(!is_valid_sequence("", SequenceKind::Protein));
    }

    #[test]
    fn test_contact_email_accepts_plain_address() {
        assert!(validate_contact_email("user@example.org").is_ok());
        assert!(validate_contact_email("first.last+tag@lab.example.co").is_ok());
    }

    #[test]
    fn test_contact_email_rejects_empty_and_malformed() {
        assert!(validate_contact_email("").is_err());
        assert!(validate_contact_email("   ").is_err());
        assert!(validate_contact_email("no-at-sign").is_err());
        assert!(validate_contact_email("user@nodot").is_err());
        assert!(validate_contact_email("two@@example.org").is_err());
    }
}
