//! Local DrugBank store lookup
//!
//! Read-only queries against a local SQLite store of drug records joined
//! across the drug, product and pathway tables. All match fragments are
//! bound as parameters; user input never reaches the query text.

use rusqlite::{params_from_iter, Connection, OpenFlags};
use seqfind_common::{Result, SeqfindError};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// A drug row joined with its product route/country metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub state: String,
    pub indication: String,
    /// Distinct product routes, comma-joined
    pub route: String,
    /// Distinct product countries, comma-joined
    pub country: String,
}

/// Derive the match fragments for a disease name: every single word plus
/// every prefix word-sequence, deduplicated in first-seen order.
///
/// `"heart attack"` -> `["heart", "heart attack", "attack"]`
fn word_sequences(disease_name: &str) -> Vec<String> {
    let words: Vec<&str> = disease_name.split_whitespace().collect();
    let mut sequences = Vec::new();

    for end in 1..=words.len() {
        sequences.push(words[..end].join(" "));
    }
    for word in &words {
        sequences.push((*word).to_string());
    }

    let mut seen = HashSet::new();
    sequences.retain(|s| seen.insert(s.clone()));
    sequences
}

/// Read-only handle on the local drug store
///
/// A connection is opened per query and dropped when the query completes;
/// nothing is shared across pipeline invocations.
pub struct DrugStore {
    db_path: PathBuf,
}

impl DrugStore {
    /// Create a store handle for the given SQLite database path
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn open_connection(&self) -> Result<Connection> {
        Ok(Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY,
        )?)
    }

    /// Find approved, currently-marketed, non-withdrawn drugs whose
    /// description, indication or pathway name contains one of the disease
    /// name's word sequences (case-insensitively).
    ///
    /// Results are grouped by drug identifier and deduplicated across the
    /// supplied disease names. An empty collection is an input error.
    pub fn find_drugs(&self, disease_names: &[String]) -> Result<Vec<DrugRecord>> {
        if disease_names.is_empty() {
            return Err(SeqfindError::validation(
                "At least one disease name is required for drug lookup",
            ));
        }

        let conn = self.open_connection()?;
        let mut records: Vec<DrugRecord> = Vec::new();
        let mut seen_ids: HashSet<String> = HashSet::new();

        for disease_name in disease_names {
            for record in query_by_disease(&conn, disease_name)? {
                if seen_ids.insert(record.id.clone()) {
                    records.push(record);
                }
            }
        }

        debug!(count = records.len(), "Drug lookup complete");
        Ok(records)
    }
}

fn query_by_disease(conn: &Connection, disease_name: &str) -> Result<Vec<DrugRecord>> {
    let sequences = word_sequences(disease_name);
    if sequences.is_empty() {
        return Ok(Vec::new());
    }

    // One OR'd condition per text column per word sequence, every fragment
    // bound as a parameter
    let mut conditions = Vec::new();
    let mut bindings = Vec::new();
    for sequence in &sequences {
        let fragment = format!("%{}%", sequence.to_lowercase());
        for column in ["d.description", "d.indication", "pt.name"] {
            conditions.push(format!("lower({}) LIKE ?", column));
            bindings.push(fragment.clone());
        }
    }

    let sql = format!(
        r#"
        SELECT d.drugbank_id,
               d.name,
               d.description,
               d.state,
               d.indication,
               GROUP_CONCAT(DISTINCT p.route),
               GROUP_CONCAT(DISTINCT p.country)
        FROM drug d
            LEFT JOIN products p ON d.drugbank_id = p.drugbank_id
            LEFT JOIN pathway pt ON d.drugbank_id = pt.drugbank_id
        WHERE ({conditions})
            AND p.approved = 'true'
            AND (p.ended_marketing_on IS NULL
                 OR p.ended_marketing_on = ''
                 OR p.ended_marketing_on >= date('now'))
            AND d.drugbank_id NOT IN (
                SELECT drugbank_id FROM groups WHERE lower(description) = 'withdrawn'
            )
        GROUP BY d.drugbank_id
        ORDER BY d.drugbank_id
        "#,
        conditions = conditions.join(" OR ")
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(bindings.iter()), |row| {
        Ok(DrugRecord {
            id: row.get(0)?,
            name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            state: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            indication: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            route: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
            country: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}
