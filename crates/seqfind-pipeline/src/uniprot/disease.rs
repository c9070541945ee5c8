//! Profile and disease extraction from an annotation record
//!
//! The disease association is a double cross-reference: a feature must match
//! a supplied variant by position, original residue and alternative residue,
//! AND share at least one evidence identifier with a disease comment on the
//! same record. A coincidental position match alone never yields a disease.

use crate::uniprot::types::AnnotationRecord;
use crate::variant::Variant;
use serde::Serialize;
use std::collections::HashSet;

/// Feature types that carry positional variant annotations
const VARIANT_FEATURE_TYPES: [&str; 2] = ["Natural variant", "Mutagenesis"];

/// Sentinel used for absent organism/name fields
const ABSENT: &str = "-";

/// A disease linked to a matched variant, deduplicated by value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseMatch {
    pub disease_id: String,
    pub acronym: String,
    pub description: String,
}

/// Organism, naming and activity summary of an annotation record
#[derive(Debug, Clone, Serialize)]
pub struct ProteinProfile {
    pub entry_type: String,
    pub scientific_name: String,
    pub common_name: String,
    pub taxon_id: String,
    pub lineage: String,
    pub full_name: String,
    pub short_name: String,
    pub protein_function: String,
    pub catalytic_activity: String,
}

fn or_absent(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => ABSENT.to_string(),
    }
}

/// Extract the organism/naming/function summary of the record.
///
/// Absent fields fall back to the `-` sentinel.
pub fn extract_profile(record: &AnnotationRecord) -> ProteinProfile {
    let organism = record.organism.as_ref();

    let lineage = organism
        .map(|o| o.lineage.join("; "))
        .unwrap_or_default();

    let recommended = record
        .protein_description
        .as_ref()
        .and_then(|d| d.recommended_name.as_ref());

    let full_name = recommended
        .and_then(|n| n.full_name.as_ref())
        .map(|v| v.value.clone());

    let short_name = recommended.map(|n| {
        n.short_names
            .iter()
            .map(|v| v.value.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    });

    let protein_function = record
        .comments
        .iter()
        .filter(|c| c.comment_type == "FUNCTION")
        .flat_map(|c| c.texts.iter())
        .map(|t| t.value.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let catalytic_activity = record
        .comments
        .iter()
        .filter(|c| c.comment_type == "CATALYTIC ACTIVITY")
        .find_map(|c| c.reaction.as_ref())
        .map(|r| r.name.clone());

    ProteinProfile {
        entry_type: record.entry_type.clone(),
        scientific_name: or_absent(
            organism.and_then(|o| o.scientific_name.clone()),
        ),
        common_name: or_absent(organism.and_then(|o| o.common_name.clone())),
        taxon_id: or_absent(organism.and_then(|o| o.taxon_id.map(|t| t.to_string()))),
        lineage: or_absent(Some(lineage)),
        full_name: or_absent(full_name),
        short_name: or_absent(short_name),
        protein_function: or_absent(Some(protein_function)),
        catalytic_activity: or_absent(catalytic_activity),
    }
}

fn is_single_residue(s: &str, residue: char) -> bool {
    let mut chars = s.chars();
    chars.next() == Some(residue) && chars.next().is_none()
}

/// Extract the diseases causally linked to the supplied variants.
///
/// 1. Inactive entries yield no diseases.
/// 2. Per-disease evidence-identifier sets are collected from DISEASE
///    comments.
/// 3. Every `Natural variant` / `Mutagenesis` feature whose start position,
///    original residue and one alternative residue all match a supplied
///    variant contributes its evidence identifiers; each identifier found in
///    a disease's evidence set records that disease.
/// 4. The result is deduplicated by value, possibly empty.
pub fn extract_diseases(record: &AnnotationRecord, variants: &[Variant]) -> Vec<DiseaseMatch> {
    if record.is_inactive() {
        return Vec::new();
    }

    let diseases: Vec<(DiseaseMatch, HashSet<&str>)> = record
        .comments
        .iter()
        .filter(|c| c.comment_type == "DISEASE")
        .filter_map(|c| c.disease.as_ref())
        .map(|d| {
            let evidence_ids = d
                .evidences
                .iter()
                .filter_map(|e| e.id.as_deref())
                .collect();
            let matched = DiseaseMatch {
                disease_id: d.disease_id.clone(),
                acronym: or_absent(d.acronym.clone()),
                description: or_absent(d.description.clone()),
            };
            (matched, evidence_ids)
        })
        .collect();

    let mut matches: Vec<DiseaseMatch> = Vec::new();

    for feature in record
        .features
        .iter()
        .filter(|f| VARIANT_FEATURE_TYPES.contains(&f.feature_type.as_str()))
    {
        let Some(alt) = feature.alternative_sequence.as_ref() else {
            continue;
        };

        let feature_matches_variant = variants.iter().any(|v| {
            feature.location.start.value == v.position
                && alt
                    .original_sequence
                    .as_deref()
                    .is_some_and(|orig| is_single_residue(orig, v.original))
                && alt
                    .alternative_sequences
                    .iter()
                    .any(|a| is_single_residue(a, v.variation))
        });

        if !feature_matches_variant {
            continue;
        }

        for evidence_id in feature.evidences.iter().filter_map(|e| e.id.as_deref()) {
            for (disease, evidence_ids) in &diseases {
                if evidence_ids.contains(evidence_id) && !matches.contains(disease) {
                    matches.push(disease.clone());
                }
            }
        }
    }

    matches
}
