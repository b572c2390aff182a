//! Batch driver: manifest-ordered mirroring of many documents
//!
//! Reads an ordered manifest of products and documents and runs the update
//! gate plus materializer once per document. A per-document failure is
//! caught, recorded in the batch report, and the driver continues with the
//! rest of the manifest; `fail-fast` in the config restores abort-on-first-
//! failure behavior.

use crate::api::ApiClient;
use crate::config::Config;
use crate::materialize::{sanitize_title, Materializer};
use crate::report::{BatchReport, DocumentRecord, DocumentStatus};
use crate::update::{prepare_output_dir, UpdateDecision, FULL_DOCUMENT_FILENAME, PAGES_DIRNAME};
use crate::{ManifestError, MirrorError, Result};
use chrono::Utc;
use serde::Deserialize;
use std::path::Path;

/// Ordered manifest of products and the documents to mirror under each
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub children: Vec<ProductEntry>,
}

/// One product grouping in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ProductEntry {
    pub name: String,
    #[serde(default)]
    pub children: Vec<DocumentEntry>,
}

/// One document entry in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentEntry {
    pub name: String,
    /// Pretty URL of the document; entries without a link are skipped
    #[serde(default)]
    pub link: Option<String>,
    /// Rebuild this document even if output already exists
    #[serde(default)]
    pub update: bool,
}

/// Loads and parses a JSON manifest file
pub fn load_manifest(path: &Path) -> std::result::Result<Manifest, ManifestError> {
    let content = std::fs::read_to_string(path)?;
    let manifest: Manifest = serde_json::from_str(&content)?;
    Ok(manifest)
}

/// Drives a batch run: update gate, API calls, and materialization per
/// manifest document
pub struct BatchDriver {
    config: Config,
    api: ApiClient,
}

impl BatchDriver {
    /// Creates a batch driver from the session configuration
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api, &config.user_agent)?;
        Ok(Self { config, api })
    }

    /// Mirrors every linked document in the manifest, in declared order
    pub async fn run(&self, manifest: &Manifest) -> Result<BatchReport> {
        let started_at = Utc::now();
        let mut documents = Vec::new();

        for product in &manifest.children {
            tracing::info!("Processing product: {}", product.name);

            for doc in &product.children {
                let Some(link) = &doc.link else {
                    tracing::debug!("Skipping {}: no link in manifest", doc.name);
                    continue;
                };

                let status = match self
                    .mirror_document(&product.name, &doc.name, link, doc.update)
                    .await
                {
                    Ok(status) => status,
                    Err(e) => {
                        tracing::error!(
                            "Failed to mirror '{}' in '{}': {}",
                            doc.name,
                            product.name,
                            e
                        );
                        if self.config.batch.fail_fast {
                            return Err(e);
                        }
                        DocumentStatus::Failed {
                            error: e.to_string(),
                        }
                    }
                };

                documents.push(DocumentRecord {
                    product: product.name.clone(),
                    name: doc.name.clone(),
                    status,
                });
            }
        }

        tracing::info!("All documentation generation complete");
        Ok(BatchReport {
            started_at,
            finished_at: Utc::now(),
            documents,
        })
    }

    /// Mirrors a single document into `<root>/<product>/<document>/`
    ///
    /// Resolution, version, and TOC fetches happen only after the update gate
    /// decides to proceed, so a skipped document performs zero network
    /// activity. The fingerprint fetched here is threaded through the entire
    /// traversal unchanged.
    pub async fn mirror_document(
        &self,
        product_name: &str,
        doc_name: &str,
        pretty_url: &str,
        update: bool,
    ) -> Result<DocumentStatus> {
        let doc_dir = Path::new(&self.config.output.root)
            .join(sanitize_title(product_name))
            .join(sanitize_title(doc_name));

        if prepare_output_dir(&doc_dir, update)? == UpdateDecision::Skip {
            return Ok(DocumentStatus::Skipped);
        }

        let pages_dir = doc_dir.join(PAGES_DIRNAME);
        std::fs::create_dir_all(&pages_dir).map_err(|source| MirrorError::Filesystem {
            path: pages_dir.clone(),
            source,
        })?;
        tracing::info!("Processing document: {} in {}", doc_name, doc_dir.display());

        let resolution = self.api.resolve(pretty_url).await?;
        let fingerprint = self.api.fetch_version(&resolution.document_id).await?;
        let toc = self
            .api
            .fetch_toc(&resolution.document_id, &fingerprint)
            .await?;

        let mut materializer = Materializer::new(&self.api, &resolution.document_id, &fingerprint);
        materializer.materialize(&toc, &pages_dir).await?;
        let topics = materializer.visited();

        let full_file = doc_dir.join(FULL_DOCUMENT_FILENAME);
        tracing::info!("Writing full documentation: {}", full_file.display());
        let full_document = materializer.into_full_document(doc_name);
        std::fs::write(&full_file, full_document).map_err(|source| MirrorError::Filesystem {
            path: full_file.clone(),
            source,
        })?;

        tracing::info!("Completed processing {}", doc_name);
        Ok(DocumentStatus::Mirrored { topics })
    }
}
