//! TOC-to-filesystem materializer
//!
//! Pre-order depth-first walk over a document's TOC tree. For each node the
//! walker fetches content, computes the numbering path and output path,
//! aggregates the subtree's content into the node's file, and appends the
//! node's own fragment to a flat whole-document accumulator.
//!
//! Layout rule: top-level nodes own a directory (`label/label.html`); every
//! deeper node is a single `label.html` file inside its top-level ancestor's
//! directory. Intermediate nodes never own a directory of their own.
//!
//! Any fetch error aborts the document's traversal immediately; there is no
//! partial continuation into sibling nodes.

use crate::api::{ApiClient, TocNode};
use crate::materialize::html::{
    full_document_footer, full_document_header, render_page, render_section,
};
use crate::materialize::numbering::{count_nodes, sanitize_title, NumberingPath};
use crate::{MirrorError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Materializes one document's TOC tree into a numbered file hierarchy
pub struct Materializer<'a> {
    api: &'a ApiClient,
    document_id: String,
    fingerprint: String,
    /// Fragments already fetched during this crawl, keyed by topic id. The
    /// fingerprint pins content for the whole crawl, so a topic's fragment
    /// cannot change between the subtree-aggregation pass of an ancestor and
    /// the node's own pass.
    fragments: HashMap<String, String>,
    /// Whole-document accumulator: every node's own section, traversal order
    full_document: Vec<String>,
    visited: usize,
    total: usize,
}

impl<'a> Materializer<'a> {
    /// Creates a materializer bound to one document crawl
    ///
    /// The fingerprint passed here is used for every content fetch of the
    /// crawl; mixing fingerprints within one traversal is undefined behavior
    /// for the remote API and must never happen.
    pub fn new(api: &'a ApiClient, document_id: &str, fingerprint: &str) -> Self {
        Self {
            api,
            document_id: document_id.to_string(),
            fingerprint: fingerprint.to_string(),
            fragments: HashMap::new(),
            full_document: Vec::new(),
            visited: 0,
            total: 0,
        }
    }

    /// Walks the TOC tree and writes one file per node under `pages_dir`
    pub async fn materialize(&mut self, toc: &[TocNode], pages_dir: &Path) -> Result<()> {
        self.total = count_nodes(toc);
        self.visited = 0;
        tracing::info!(
            "Materializing {} topics for document {}",
            self.total,
            self.document_id
        );

        self.walk(toc, &NumberingPath::root(), pages_dir).await?;

        tracing::info!(
            "Materialized {}/{} topics for document {}",
            self.visited,
            self.total,
            self.document_id
        );
        Ok(())
    }

    /// Number of nodes materialized so far
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Consumes the materializer and renders the whole-document file: the
    /// flat concatenation of every node's own section wrapped in one shell
    pub fn into_full_document(self, title: &str) -> String {
        let mut parts = Vec::with_capacity(self.full_document.len() + 2);
        parts.push(full_document_header(title));
        parts.extend(self.full_document);
        parts.push(full_document_footer().to_string());
        parts.join("\n")
    }

    async fn walk(
        &mut self,
        nodes: &[TocNode],
        prefix: &NumberingPath,
        parent_dir: &Path,
    ) -> Result<()> {
        for (idx, node) in nodes.iter().enumerate() {
            let numbering = prefix.child(idx + 1);
            let label = format!("{}_{}", numbering, sanitize_title(&node.title));
            let heading = format!("{} {}", numbering, node.title);

            // Render this node's file content: its own section followed by
            // the fully rendered content of every descendant
            let aggregated = self.render_subtree(node, &numbering).await?;

            // The node's own fragment (cached by the subtree render above)
            // extends the flat whole-document accumulator
            let fragment = self.fragment(&node.content_id).await?;
            let level = heading_level(node, &numbering);
            self.full_document
                .push(render_section(&node.content_id, level, &heading, &fragment));

            // Top-level nodes own a directory; deeper nodes are flat files
            // inside their top-level ancestor's directory
            let (own_dir, file_path) = if numbering.depth() == 1 {
                let dir = parent_dir.join(&label);
                let file = dir.join(format!("{}.html", label));
                (dir, file)
            } else {
                (parent_dir.to_path_buf(), parent_dir.join(format!("{}.html", label)))
            };

            create_dir_all(&own_dir)?;
            tracing::info!("Writing section file: {}", file_path.display());
            write_file(&file_path, &render_page(&heading, &aggregated))?;

            self.visited += 1;
            tracing::debug!(
                "Progress: {}/{} topics materialized",
                self.visited,
                self.total
            );
            if self.visited % 10 == 0 {
                tracing::info!(
                    "Progress: {}/{} topics materialized",
                    self.visited,
                    self.total
                );
            }

            if !node.children.is_empty() {
                // Recursion through the heap; TOC nesting is shallow but the
                // future would otherwise be infinitely sized
                Box::pin(self.walk(&node.children, &numbering, &own_dir)).await?;
            }
        }

        Ok(())
    }

    /// Renders a node's section followed by all descendant sections
    async fn render_subtree(&mut self, node: &TocNode, numbering: &NumberingPath) -> Result<String> {
        let fragment = self.fragment(&node.content_id).await?;
        let heading = format!("{} {}", numbering, node.title);
        let level = heading_level(node, numbering);

        let mut sections = vec![render_section(&node.content_id, level, &heading, &fragment)];
        for (idx, child) in node.children.iter().enumerate() {
            let child_numbering = numbering.child(idx + 1);
            sections.push(Box::pin(self.render_subtree(child, &child_numbering)).await?);
        }

        Ok(sections.join("\n"))
    }

    /// Returns the extracted fragment for a topic, fetching it on first use
    async fn fragment(&mut self, topic_id: &str) -> Result<String> {
        if let Some(cached) = self.fragments.get(topic_id) {
            return Ok(cached.clone());
        }

        let fragment = self
            .api
            .fetch_fragment(&self.document_id, topic_id, &self.fingerprint)
            .await?;
        self.fragments.insert(topic_id.to_string(), fragment.clone());
        Ok(fragment)
    }
}

/// Heading level: the source's explicit level when supplied, else tree depth
fn heading_level(node: &TocNode, numbering: &NumberingPath) -> u8 {
    node.topic_level
        .unwrap_or_else(|| numbering.depth().min(u8::MAX as usize) as u8)
}

fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| MirrorError::Filesystem {
        path: PathBuf::from(path),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| MirrorError::Filesystem {
        path: PathBuf::from(path),
        source,
    })
}
