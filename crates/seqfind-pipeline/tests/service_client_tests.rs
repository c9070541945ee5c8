//! Integration tests for the translation and annotation clients

use seqfind_common::SeqfindError;
use seqfind_pipeline::config::PipelineConfig;
use seqfind_pipeline::expasy::TranslateClient;
use seqfind_pipeline::uniprot::AnnotationClient;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn translate_posts_sequence_and_returns_fasta_body() {
    let server = MockServer::start().await;
    let fasta = ">5'3' Frame 1\nMKLVH-\n>5'3' Frame 2\n-KLV\n";
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_string_contains("dna_sequence=ATGGCC"))
        .and(body_string_contains("output_format=fasta"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fasta))
        .expect(1)
        .mount(&server)
        .await;

    let config = PipelineConfig {
        expasy_url: format!("{}/translate", server.uri()),
        ..PipelineConfig::default()
    };
    let client = TranslateClient::new(&config).unwrap();

    let body = client.translate("ATGGCC").await.unwrap();
    assert_eq!(body, fasta);
}

#[tokio::test]
async fn translate_maps_non_success_status_to_remote_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = PipelineConfig {
        expasy_url: format!("{}/translate", server.uri()),
        ..PipelineConfig::default()
    };
    let client = TranslateClient::new(&config).unwrap();

    let err = client.translate("ATGGCC").await.unwrap_err();
    assert!(matches!(err, SeqfindError::RemoteService { .. }));
}

#[tokio::test]
async fn fetch_annotation_requests_json_for_the_accession() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/P04637.json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entryType": "UniProtKB reviewed (Swiss-Prot)",
            "organism": {"scientificName": "Homo sapiens", "taxonId": 9606}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = PipelineConfig {
        uniprot_url: format!("{}/uniprotkb", server.uri()),
        ..PipelineConfig::default()
    };
    let client = AnnotationClient::new(&config).unwrap();

    let record = client.fetch_annotation("P04637").await.unwrap();
    assert!(!record.is_inactive());
    assert_eq!(
        record.organism.unwrap().scientific_name.as_deref(),
        Some("Homo sapiens")
    );
}

#[tokio::test]
async fn fetch_annotation_rejects_empty_accession_before_any_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = PipelineConfig {
        uniprot_url: format!("{}/uniprotkb", server.uri()),
        ..PipelineConfig::default()
    };
    let client = AnnotationClient::new(&config).unwrap();

    let err = client.fetch_annotation("  ").await.unwrap_err();
    assert!(matches!(err, SeqfindError::Validation(_)));
}

#[tokio::test]
async fn fetch_annotation_maps_not_found_to_remote_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/XXXXXX.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = PipelineConfig {
        uniprot_url: format!("{}/uniprotkb", server.uri()),
        ..PipelineConfig::default()
    };
    let client = AnnotationClient::new(&config).unwrap();

    let err = client.fetch_annotation("XXXXXX").await.unwrap_err();
    assert!(matches!(err, SeqfindError::RemoteService { .. }));
}

#[tokio::test]
async fn fetch_annotation_maps_malformed_body_to_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uniprotkb/P04637.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let config = PipelineConfig {
        uniprot_url: format!("{}/uniprotkb", server.uri()),
        ..PipelineConfig::default()
    };
    let client = AnnotationClient::new(&config).unwrap();

    let err = client.fetch_annotation("P04637").await.unwrap_err();
    assert!(matches!(err, SeqfindError::Decode { .. }));
}
