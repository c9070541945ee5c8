//! Open reading frame extraction
//!
//! Scans translated protein text for the longest uninterrupted run starting
//! at the start-codon residue `M`.

/// Residue that opens a candidate reading frame
const START_RESIDUE: char = 'M';

/// Characters that terminate a run: stop/gap marker and FASTA frame header
const RUN_BREAKERS: [char; 2] = ['-', '>'];

/// Return the longest open reading frame in `protein_text`.
///
/// Newlines are stripped first. A candidate run starts when `M` is seen and
/// accumulates every following character until a `-` or `>` breaks it.
/// The longest run wins; ties keep the first-seen run. Returns an empty
/// string when no run ever starts. Single linear scan, O(n).
pub fn longest_orf(protein_text: &str) -> String {
    let mut best = String::new();
    let mut current = String::new();
    let mut in_run = false;

    for c in protein_text.chars().filter(|c| *c != '\n' && *c != '\r') {
        if RUN_BREAKERS.contains(&c) {
            if in_run && current.len() > best.len() {
                best = std::mem::take(&mut current);
            }
            current.clear();
            in_run = false;
        } else if in_run {
            current.push(c);
        } else if c == START_RESIDUE {
            in_run = true;
            current.push(c);
        }
    }

    // Run still open at end of text
    if in_run && current.len() > best.len() {
        best = current;
    }

    best
}
