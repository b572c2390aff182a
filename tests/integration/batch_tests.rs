//! Integration tests for the batch driver

use crate::helpers::*;
use docmirror::batch::{load_manifest, BatchDriver};
use docmirror::report::{format_markdown_report, DocumentStatus};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_manifest(dir: &Path, manifest: &serde_json::Value) -> std::path::PathBuf {
    let manifest_path = dir.join("doctree.json");
    std::fs::write(&manifest_path, manifest.to_string()).unwrap();
    manifest_path
}

#[tokio::test]
async fn test_batch_mirrors_manifest_in_order() {
    let server = MockServer::start().await;
    mount_example_document(&server, "guide-a", "doc-a", "fp-a").await;
    mount_example_document(&server, "guide-b", "doc-b", "fp-b").await;

    let output = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        output.path(),
        &json!({
            "children": [
                {
                    "name": "Cortex",
                    "children": [
                        { "name": "Guide A", "link": "guide-a" },
                        { "name": "Guide B", "link": "guide-b" }
                    ]
                }
            ]
        }),
    );

    let config = test_config(&server.uri(), output.path(), &manifest_path);
    let driver = BatchDriver::new(config).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();

    let report = driver.run(&manifest).await.expect("Batch failed");

    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.mirrored_count(), 2);
    assert_eq!(report.documents[0].name, "Guide A");
    assert_eq!(report.documents[1].name, "Guide B");

    assert!(output
        .path()
        .join("Cortex")
        .join("Guide A")
        .join("full_documentation.html")
        .exists());
    assert!(output
        .path()
        .join("Cortex")
        .join("Guide B")
        .join("full_documentation.html")
        .exists());
}

#[tokio::test]
async fn test_batch_skips_entries_without_link() {
    let server = MockServer::start().await;
    mount_example_document(&server, "guide-a", "doc-a", "fp-a").await;

    let output = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        output.path(),
        &json!({
            "children": [
                {
                    "name": "Cortex",
                    "children": [
                        { "name": "Linked", "link": "guide-a" },
                        { "name": "Unlinked placeholder" }
                    ]
                }
            ]
        }),
    );

    let config = test_config(&server.uri(), output.path(), &manifest_path);
    let driver = BatchDriver::new(config).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();

    let report = driver.run(&manifest).await.expect("Batch failed");

    // Unlinked entries are skipped silently and never recorded
    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].name, "Linked");
}

#[tokio::test]
async fn test_batch_continues_after_document_failure() {
    let server = MockServer::start().await;

    // First document fails at resolution
    Mock::given(method("POST"))
        .and(path("/internal/api/webapp/pretty-url/reader"))
        .and(body_json(json!({
            "prettyUrl": "broken-guide",
            "forcedTocId": null
        })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // Second document works
    mount_example_document(&server, "good-guide", "doc-b", "fp-b").await;

    let output = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        output.path(),
        &json!({
            "children": [
                {
                    "name": "Cortex",
                    "children": [
                        { "name": "Broken", "link": "broken-guide" },
                        { "name": "Good", "link": "good-guide" }
                    ]
                }
            ]
        }),
    );

    let config = test_config(&server.uri(), output.path(), &manifest_path);
    let driver = BatchDriver::new(config).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();

    let report = driver.run(&manifest).await.expect("Batch must not abort");

    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(report.mirrored_count(), 1);
    assert!(matches!(
        report.documents[0].status,
        DocumentStatus::Failed { .. }
    ));
    assert_eq!(
        report.documents[1].status,
        DocumentStatus::Mirrored { topics: 3 }
    );

    // The good document's output exists despite the earlier failure
    assert!(output
        .path()
        .join("Cortex")
        .join("Good")
        .join("full_documentation.html")
        .exists());
}

#[tokio::test]
async fn test_batch_fail_fast_aborts_on_first_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/internal/api/webapp/pretty-url/reader"))
        .and(body_json(json!({
            "prettyUrl": "broken-guide",
            "forcedTocId": null
        })))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let manifest_path = write_manifest(
        output.path(),
        &json!({
            "children": [
                {
                    "name": "Cortex",
                    "children": [
                        { "name": "Broken", "link": "broken-guide" },
                        { "name": "Never reached", "link": "good-guide" }
                    ]
                }
            ]
        }),
    );

    let mut config = test_config(&server.uri(), output.path(), &manifest_path);
    config.batch.fail_fast = true;
    let driver = BatchDriver::new(config).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();

    assert!(driver.run(&manifest).await.is_err());
}

#[tokio::test]
async fn test_batch_respects_per_document_update_flag() {
    let server = MockServer::start().await;
    mount_example_document(&server, "guide-a", "doc-a", "fp-a").await;

    let output = TempDir::new().unwrap();

    // Pre-existing output for the document
    let doc_dir = output.path().join("Cortex").join("Guide A");
    std::fs::create_dir_all(&doc_dir).unwrap();
    std::fs::write(doc_dir.join("full_documentation.html"), "prior output").unwrap();

    let manifest_path = write_manifest(
        output.path(),
        &json!({
            "children": [
                {
                    "name": "Cortex",
                    "children": [
                        { "name": "Guide A", "link": "guide-a", "update": false }
                    ]
                }
            ]
        }),
    );

    let config = test_config(&server.uri(), output.path(), &manifest_path);
    let driver = BatchDriver::new(config).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();

    let report = driver.run(&manifest).await.expect("Batch failed");
    assert_eq!(report.skipped_count(), 1);

    // Now request a rebuild via the manifest flag
    let manifest_path = write_manifest(
        output.path(),
        &json!({
            "children": [
                {
                    "name": "Cortex",
                    "children": [
                        { "name": "Guide A", "link": "guide-a", "update": true }
                    ]
                }
            ]
        }),
    );
    let manifest = load_manifest(&manifest_path).unwrap();

    let report = driver.run(&manifest).await.expect("Batch failed");
    assert_eq!(report.mirrored_count(), 1);

    let rebuilt = std::fs::read_to_string(doc_dir.join("full_documentation.html")).unwrap();
    assert_ne!(rebuilt, "prior output");
    assert!(rebuilt.contains("<p>overview body</p>"));
}

#[tokio::test]
async fn test_report_covers_every_outcome() {
    let server = MockServer::start().await;
    mount_example_document(&server, "good-guide", "doc-a", "fp-a").await;
    Mock::given(method("POST"))
        .and(path("/internal/api/webapp/pretty-url/reader"))
        .and(body_json(json!({
            "prettyUrl": "broken-guide",
            "forcedTocId": null
        })))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();

    // Pre-existing output for the skipped document
    let skipped_dir = output.path().join("Cortex").join("Skipped");
    std::fs::create_dir_all(skipped_dir.join("pages")).unwrap();

    let manifest_path = write_manifest(
        output.path(),
        &json!({
            "children": [
                {
                    "name": "Cortex",
                    "children": [
                        { "name": "Good", "link": "good-guide" },
                        { "name": "Skipped", "link": "skipped-guide" },
                        { "name": "Broken", "link": "broken-guide" }
                    ]
                }
            ]
        }),
    );

    let config = test_config(&server.uri(), output.path(), &manifest_path);
    let driver = BatchDriver::new(config).unwrap();
    let manifest = load_manifest(&manifest_path).unwrap();

    let report = driver.run(&manifest).await.expect("Batch failed");
    assert_eq!(report.mirrored_count(), 1);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.failed_count(), 1);

    let md = format_markdown_report(&report);
    assert!(md.contains("| Cortex | Good | mirrored (3 topics) |"));
    assert!(md.contains("| Cortex | Skipped | skipped |"));
    assert!(md.contains("| Cortex | Broken | failed:"));
}
