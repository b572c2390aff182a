//! Update manager: skip vs delete-then-rebuild
//!
//! Per-document gate over the output directory. A document whose output
//! already exists is skipped unless its manifest entry sets `update`; with
//! `update` set, prior output is deleted before the document is rebuilt from
//! scratch. A rebuild never writes into a partially cleaned tree: a deletion
//! failure is fatal for that document.

use crate::{MirrorError, Result};
use std::path::Path;

/// Filename of the whole-document file inside a document's output directory
pub const FULL_DOCUMENT_FILENAME: &str = "full_documentation.html";

/// Name of the per-node pages directory inside a document's output directory
pub const PAGES_DIRNAME: &str = "pages";

/// Outcome of the update gate for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    /// No prior output (or prior output deleted); materialize the document
    Proceed,
    /// Prior output exists and `update` is not set; do nothing further
    Skip,
}

/// Checks whether a document directory already holds mirrored output
pub fn has_existing_output(doc_dir: &Path) -> bool {
    doc_dir.join(FULL_DOCUMENT_FILENAME).exists() || doc_dir.join(PAGES_DIRNAME).exists()
}

/// Applies the skip/rebuild decision table to a document's output directory
///
/// | output exists | `update` | action |
/// |---------------|----------|--------|
/// | no            | any      | proceed |
/// | yes           | false    | skip, no network or filesystem activity |
/// | yes           | true     | delete prior output, then proceed |
pub fn prepare_output_dir(doc_dir: &Path, update: bool) -> Result<UpdateDecision> {
    if !has_existing_output(doc_dir) {
        return Ok(UpdateDecision::Proceed);
    }

    if !update {
        tracing::info!(
            "Skipping {}: output exists and update is not requested",
            doc_dir.display()
        );
        return Ok(UpdateDecision::Skip);
    }

    delete_existing_output(doc_dir)?;
    Ok(UpdateDecision::Proceed)
}

/// Deletes a document's whole-document file and pages directory
///
/// Failures surface as [`MirrorError::Filesystem`] and are not retried; an
/// existence check after a failed deletion would still report the
/// pre-deletion state, so callers must treat this as fatal for the document.
fn delete_existing_output(doc_dir: &Path) -> Result<()> {
    let full_file = doc_dir.join(FULL_DOCUMENT_FILENAME);
    if full_file.exists() {
        std::fs::remove_file(&full_file).map_err(|source| MirrorError::Filesystem {
            path: full_file.clone(),
            source,
        })?;
        tracing::info!("Deleted existing file: {}", full_file.display());
    }

    let pages_dir = doc_dir.join(PAGES_DIRNAME);
    if pages_dir.exists() {
        std::fs::remove_dir_all(&pages_dir).map_err(|source| MirrorError::Filesystem {
            path: pages_dir.clone(),
            source,
        })?;
        tracing::info!("Deleted existing directory: {}", pages_dir.display());
    }

    Ok(())
}
