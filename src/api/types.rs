//! Wire types for the content API
//!
//! These mirror the JSON shapes the documentation portal returns. Field names
//! follow the remote API (camelCase, plus the odd `topic-level` kebab key on
//! TOC entries).

use serde::Deserialize;

/// Result of resolving a pretty URL to a document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Opaque identifier of the resolved document
    pub document_id: String,

    /// TOC identifier returned alongside the document id. The content API
    /// never needs it again, but the response always carries it.
    #[serde(default)]
    pub toc_id: Option<String>,
}

/// Document map response, carrying the version fingerprint
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentMap {
    /// Version token that must accompany every subsequent TOC and content
    /// fetch for this document
    pub fingerprint: String,
}

/// Top-level pages response wrapping the paginated TOC
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesResponse {
    #[serde(default)]
    pub paginated_toc: Vec<PaginatedTocEntry>,
}

/// One page of the paginated TOC
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedTocEntry {
    #[serde(default)]
    pub page_toc: Vec<TocNode>,
}

/// A node of a document's table-of-contents tree
///
/// Forms a rooted, ordered tree per document. The API is trusted to never
/// return cycles; the owned `children` vector makes the deserialized value
/// acyclic by construction.
#[derive(Debug, Clone, Deserialize)]
pub struct TocNode {
    /// Topic identifier used to fetch this node's content
    #[serde(rename = "contentId")]
    pub content_id: String,

    /// Human-readable topic title
    pub title: String,

    /// Ordered child topics
    #[serde(default)]
    pub children: Vec<TocNode>,

    /// Heading level the source assigned to this topic, when it did
    #[serde(rename = "topic-level", default)]
    pub topic_level: Option<u8>,
}
