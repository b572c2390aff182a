//! Content API client
//!
//! Four blocking-style calls against the documentation portal, issued one at
//! a time over a single [`reqwest::Client`]:
//!
//! 1. Resolve a pretty URL to a document id
//! 2. Fetch the document map (version fingerprint)
//! 3. Fetch the table of contents
//! 4. Fetch one topic's HTML content
//!
//! There are no retries and no caching here; the fingerprint parameter is the
//! only cache key the remote API understands. No timeout is imposed beyond
//! the transport's defaults, so a stalled remote call blocks the caller
//! indefinitely. That is a documented limitation, not something this module
//! papers over.

use crate::api::extract::extract_fragment;
use crate::api::types::{DocumentMap, PagesResponse, Resolution, TocNode};
use crate::config::{ApiConfig, UserAgentConfig};
use crate::{MirrorError, Result};
use reqwest::Client;
use serde_json::json;

/// Builds the HTTP client shared by all API calls in a session
pub fn build_http_client(config: &UserAgentConfig) -> std::result::Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", config.name, config.version);

    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Client for the versioned content API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    reader_target: String,
    locale_container_class: String,
}

impl ApiClient {
    /// Creates an API client from the session configuration
    pub fn new(api: &ApiConfig, user_agent: &UserAgentConfig) -> Result<Self> {
        let client = build_http_client(user_agent)?;
        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            reader_target: api.reader_target.clone(),
            locale_container_class: api.locale_container_class.clone(),
        })
    }

    /// Resolves a pretty URL to a document id (and the unused TOC id)
    pub async fn resolve(&self, pretty_url: &str) -> Result<Resolution> {
        let endpoint = format!("{}/internal/api/webapp/pretty-url/reader", self.base_url);
        tracing::info!("Resolving pretty URL: {}", pretty_url);

        let response = self
            .client
            .post(&endpoint)
            .json(&json!({ "prettyUrl": pretty_url, "forcedTocId": null }))
            .send()
            .await
            .map_err(|e| MirrorError::Resolution {
                pretty_url: pretty_url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Resolution {
                pretty_url: pretty_url.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let resolution =
            response
                .json::<Resolution>()
                .await
                .map_err(|e| MirrorError::Resolution {
                    pretty_url: pretty_url.to_string(),
                    message: format!("missing or malformed documentId: {}", e),
                })?;

        tracing::info!(
            "Resolved to documentId {} (tocId {:?})",
            resolution.document_id,
            resolution.toc_id
        );
        Ok(resolution)
    }

    /// Fetches the version fingerprint for a document
    ///
    /// The fingerprint is fetched exactly once per crawl of a document and
    /// must be reused unmodified for every subsequent TOC and content fetch
    /// in that crawl.
    pub async fn fetch_version(&self, document_id: &str) -> Result<String> {
        let endpoint = format!("{}/api/khub/maps/{}", self.base_url, document_id);
        tracing::info!("Fetching document map for documentId: {}", document_id);

        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| MirrorError::Version {
                document_id: document_id.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Version {
                document_id: document_id.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let map = response
            .json::<DocumentMap>()
            .await
            .map_err(|e| MirrorError::Version {
                document_id: document_id.to_string(),
                message: format!("missing or malformed fingerprint: {}", e),
            })?;

        tracing::info!("Received fingerprint: {}", map.fingerprint);
        Ok(map.fingerprint)
    }

    /// Fetches a document's table of contents
    pub async fn fetch_toc(&self, document_id: &str, fingerprint: &str) -> Result<Vec<TocNode>> {
        let endpoint = format!("{}/api/khub/maps/{}/pages", self.base_url, document_id);
        tracing::info!(
            "Fetching TOC for documentId: {} with fingerprint: {}",
            document_id,
            fingerprint
        );

        let response = self
            .client
            .get(&endpoint)
            .query(&[("v", fingerprint)])
            .send()
            .await
            .map_err(|e| MirrorError::Toc {
                document_id: document_id.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Toc {
                document_id: document_id.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let pages = response
            .json::<PagesResponse>()
            .await
            .map_err(|e| MirrorError::Toc {
                document_id: document_id.to_string(),
                message: format!("malformed pages response: {}", e),
            })?;

        // The TOC lives at paginatedToc[0].pageToc
        let toc = pages
            .paginated_toc
            .into_iter()
            .next()
            .map(|entry| entry.page_toc)
            .ok_or_else(|| MirrorError::Toc {
                document_id: document_id.to_string(),
                message: "paginatedToc is empty".to_string(),
            })?;

        tracing::info!("TOC fetched with {} top-level items", toc.len());
        Ok(toc)
    }

    /// Fetches the raw HTML content of a single topic
    pub async fn fetch_content(
        &self,
        document_id: &str,
        topic_id: &str,
        fingerprint: &str,
    ) -> Result<String> {
        let endpoint = format!(
            "{}/api/khub/maps/{}/topics/{}/content",
            self.base_url, document_id, topic_id
        );
        tracing::debug!("Fetching content for topicId: {}", topic_id);

        let response = self
            .client
            .get(&endpoint)
            .query(&[("target", self.reader_target.as_str()), ("v", fingerprint)])
            .send()
            .await
            .map_err(|e| MirrorError::ContentFetch {
                topic_id: topic_id.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::ContentFetch {
                topic_id: topic_id.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MirrorError::ContentFetch {
                topic_id: topic_id.to_string(),
                message: e.to_string(),
            })
    }

    /// Fetches a topic's content and extracts the locale content fragment
    pub async fn fetch_fragment(
        &self,
        document_id: &str,
        topic_id: &str,
        fingerprint: &str,
    ) -> Result<String> {
        let raw = self.fetch_content(document_id, topic_id, fingerprint).await?;
        Ok(extract_fragment(&raw, &self.locale_container_class))
    }
}
