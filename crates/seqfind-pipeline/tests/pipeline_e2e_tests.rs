//! End-to-end pipeline tests over mock services
//!
//! All three web services are served by a single wiremock server and the
//! drug store is a seeded temporary SQLite database.

use rusqlite::Connection;
use seqfind_pipeline::config::{PipelineConfig, PollConfig};
use seqfind_pipeline::pipeline::Pipeline;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer, db_path: &Path) -> PipelineConfig {
    PipelineConfig {
        expasy_url: format!("{}/translate", server.uri()),
        ebi_blast_url: format!("{}/blast", server.uri()),
        uniprot_url: format!("{}/uniprotkb", server.uri()),
        contact_email: "tester@example.org".to_string(),
        drugbank_db_path: db_path.to_path_buf(),
        poll: PollConfig {
            initial_interval: Duration::from_millis(5),
            max_interval: Duration::from_millis(40),
            max_attempts: 10,
        },
        ..PipelineConfig::default()
    }
}

fn seed_drug_store() -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().unwrap();
    let conn = Connection::open(file.path()).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE drug (
            drugbank_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            state TEXT,
            indication TEXT
        );
        CREATE TABLE groups (drugbank_id TEXT NOT NULL, description TEXT NOT NULL);
        CREATE TABLE products (
            drugbank_id TEXT NOT NULL,
            name TEXT,
            labeller TEXT,
            route TEXT,
            country TEXT,
            approved TEXT,
            ended_marketing_on TEXT
        );
        CREATE TABLE pathway (drugbank_id TEXT NOT NULL, name TEXT);

        INSERT INTO drug VALUES
            ('DB001', 'Trialdrug', 'Small molecule', 'solid', 'Approved for D1 management');
        INSERT INTO products (drugbank_id, name, labeller, route, country, approved, ended_marketing_on)
            VALUES ('DB001', 'Trialdrug 10mg', 'Trial Labs', 'Oral', 'US', 'true', NULL);
        "#,
    )
    .unwrap();
    file
}

/// Annotation record with a natural variant at position 3 (L -> R) whose
/// evidence links it to disease D1.
fn annotation_json() -> serde_json::Value {
    json!({
        "entryType": "UniProtKB reviewed (Swiss-Prot)",
        "organism": {
            "scientificName": "Homo sapiens",
            "commonName": "Human",
            "taxonId": 9606,
            "lineage": ["Eukaryota", "Metazoa"]
        },
        "proteinDescription": {
            "recommendedName": {
                "fullName": {"value": "Test protein"},
                "shortNames": [{"value": "TP"}]
            }
        },
        "comments": [
            {"commentType": "FUNCTION", "texts": [{"value": "Does things."}]},
            {
                "commentType": "DISEASE",
                "disease": {
                    "diseaseId": "D1",
                    "acronym": "TD",
                    "description": "Test disorder.",
                    "evidences": [{"id": "E1"}]
                }
            }
        ],
        "features": [{
            "type": "Natural variant",
            "location": {"start": {"value": 3}},
            "alternativeSequence": {
                "originalSequence": "L",
                "alternativeSequences": ["R"]
            },
            "evidences": [{"id": "E1"}]
        }]
    })
}

async fn mount_blast_mocks(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/blast/run"))
        .respond_with(ResponseTemplate::new(200).set_body_string("job-e2e"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blast/status/job-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_string("FINISHED"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blast/result/job-e2e/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{
                "hit_id": "SP:TESTP_HUMAN",
                "hit_def": "Test protein",
                "hit_acc": "P04637-2",
                "hit_uni_de": "Test protein",
                "hit_uni_os": "Homo sapiens",
                "hit_hsps": [{
                    "hsp_gaps": 0,
                    "hsp_align_len": 4,
                    "hsp_qseq": "MKRV",
                    "hsp_hseq": "MKLV"
                }]
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_pipeline_populates_every_slot() {
    let server = MockServer::start().await;
    let db = seed_drug_store();

    // Translation: the longest run starting at M is MKRV
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(">5'3' Frame 1\n-MKRV-AB\n"),
        )
        .mount(&server)
        .await;
    mount_blast_mocks(&server).await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/P04637.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(annotation_json()))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config(&server, db.path())).unwrap();
    let result = pipeline.run("ATGGCCATTGTA").await.unwrap();

    let expasy = result.expasy.unwrap();
    assert_eq!(expasy.big_orf.as_deref(), Some("MKRV"));

    let blast = result.blast.unwrap();
    assert_eq!(blast.hit_acc, "P04637"); // isoform suffix stripped
    assert_eq!(blast.variants.len(), 1);
    assert_eq!(blast.variants[0].position, 3);
    assert_eq!(blast.variants[0].original, 'L');
    assert_eq!(blast.variants[0].variation, 'R');

    let uniprot = result.uniprot.unwrap();
    assert_eq!(uniprot.profile.scientific_name, "Homo sapiens");
    assert_eq!(uniprot.diseases.len(), 1);
    assert_eq!(uniprot.diseases[0].disease_id, "D1");

    let drugs = result.drugbank.unwrap();
    assert_eq!(drugs.len(), 1);
    assert_eq!(drugs[0].id, "DB001");
    assert_eq!(drugs[0].route, "Oral");
}

#[tokio::test]
async fn protein_without_start_residue_short_circuits_before_any_search() {
    let server = MockServer::start().await;
    let db = seed_drug_store();

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(">5'3' Frame 1\nKLVGH-AB\n"),
        )
        .mount(&server)
        .await;
    // The search service must never be contacted
    Mock::given(method("POST"))
        .and(path("/blast/run"))
        .respond_with(ResponseTemplate::new(200).set_body_string("job-x"))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config(&server, db.path())).unwrap();
    let result = pipeline.run("ATGGCCATTGTA").await.unwrap();

    let expasy = result.expasy.unwrap();
    assert!(expasy.big_orf.is_none());
    assert!(expasy.protein.contains("KLVGH"));
    assert!(result.blast.is_none());
    assert!(result.uniprot.is_none());
    assert!(result.drugbank.is_none());
}

#[tokio::test]
async fn identical_alignment_short_circuits_before_annotation_fetch() {
    let server = MockServer::start().await;
    let db = seed_drug_store();

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(">5'3' Frame 1\n-MKLV-\n"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/blast/run"))
        .respond_with(ResponseTemplate::new(200).set_body_string("job-same"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blast/status/job-same"))
        .respond_with(ResponseTemplate::new(200).set_body_string("FINISHED"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blast/result/job-same/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{
                "hit_id": "SP:TESTP_HUMAN",
                "hit_def": "Test protein",
                "hit_acc": "P04637",
                "hit_uni_os": "Homo sapiens",
                "hit_hsps": [{
                    "hsp_gaps": 0,
                    "hsp_align_len": 4,
                    "hsp_qseq": "MKLV",
                    "hsp_hseq": "MKLV"
                }]
            }]
        })))
        .mount(&server)
        .await;
    // The annotation service must never be contacted
    Mock::given(method("GET"))
        .and(path("/uniprotkb/P04637.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(annotation_json()))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config(&server, db.path())).unwrap();
    let result = pipeline.run("ATGGCCATTGTA").await.unwrap();

    let blast = result.blast.unwrap();
    assert!(blast.variants.is_empty());
    assert!(result.uniprot.is_none());
    assert!(result.drugbank.is_none());
}

#[tokio::test]
async fn hit_from_wrong_organism_short_circuits_after_search() {
    let server = MockServer::start().await;
    let db = seed_drug_store();

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(">5'3' Frame 1\n-MKRV-\n"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/blast/run"))
        .respond_with(ResponseTemplate::new(200).set_body_string("job-mouse"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blast/status/job-mouse"))
        .respond_with(ResponseTemplate::new(200).set_body_string("FINISHED"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blast/result/job-mouse/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "hits": [{
                "hit_id": "SP:TESTP_MOUSE",
                "hit_def": "Test protein",
                "hit_acc": "Q99999",
                "hit_uni_os": "Mus musculus",
                "hit_hsps": [{"hsp_qseq": "MKRV", "hsp_hseq": "MKLV"}]
            }]
        })))
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config(&server, db.path())).unwrap();
    let result = pipeline.run("ATGGCCATTGTA").await.unwrap();

    assert!(result.expasy.is_some());
    assert!(result.blast.is_none());
    assert!(result.uniprot.is_none());
    assert!(result.drugbank.is_none());
}

#[tokio::test]
async fn invalid_nucleotide_input_is_rejected_before_translation() {
    let server = MockServer::start().await;
    let db = seed_drug_store();

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x"))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = Pipeline::new(test_config(&server, db.path())).unwrap();
    let err = pipeline.run("ATGXZ").await.unwrap_err();
    assert!(matches!(err, seqfind_common::SeqfindError::Validation(_)));
}
