//! Serde model of the UniProtKB entry JSON
//!
//! Only the parts of the document the pipeline reads are modeled:
//! `entryType`, `organism`, `proteinDescription`, `comments[]` and
//! `features[]`. Everything else is ignored.

use serde::Deserialize;

/// Entry-type marker for records removed from UniProtKB
const INACTIVE_ENTRY_TYPE: &str = "Inactive";

/// A structured annotation document keyed by accession
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRecord {
    pub entry_type: String,
    #[serde(default)]
    pub organism: Option<Organism>,
    #[serde(default)]
    pub protein_description: Option<ProteinDescription>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl AnnotationRecord {
    /// Whether the entry has been withdrawn from the knowledgebase
    pub fn is_inactive(&self) -> bool {
        self.entry_type.contains(INACTIVE_ENTRY_TYPE)
    }
}

/// Organism taxonomy block
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organism {
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub taxon_id: Option<i64>,
    #[serde(default)]
    pub lineage: Vec<String>,
}

/// Protein naming block
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinDescription {
    #[serde(default)]
    pub recommended_name: Option<RecommendedName>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedName {
    #[serde(default)]
    pub full_name: Option<TextValue>,
    #[serde(default)]
    pub short_names: Vec<TextValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub value: String,
}

/// Free-text comment block (FUNCTION, CATALYTIC ACTIVITY, DISEASE, ...)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment_type: String,
    #[serde(default)]
    pub texts: Vec<TextValue>,
    #[serde(default)]
    pub reaction: Option<Reaction>,
    #[serde(default)]
    pub disease: Option<Disease>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Reaction {
    pub name: String,
}

/// Disease record linked to a DISEASE comment
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
    pub disease_id: String,
    #[serde(default)]
    pub acronym: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub evidences: Vec<Evidence>,
}

/// Positional feature (Natural variant, Mutagenesis, ...)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub location: Location,
    #[serde(default)]
    pub alternative_sequence: Option<AlternativeSequence>,
    #[serde(default)]
    pub evidences: Vec<Evidence>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub start: Position,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    pub value: u32,
}

/// Residue substitution recorded on a feature
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeSequence {
    #[serde(default)]
    pub original_sequence: Option<String>,
    #[serde(default)]
    pub alternative_sequences: Vec<String>,
}

/// Evidence tag justifying a feature or disease annotation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub evidence_code: Option<String>,
}
