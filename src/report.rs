//! Batch run summary report
//!
//! After a batch run the driver writes a small markdown report next to the
//! mirrored output: when the run started and finished, what happened to each
//! document, and the totals.

use crate::{MirrorError, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

/// Filename of the report written under the output root
pub const REPORT_FILENAME: &str = "mirror_report.md";

/// Outcome of one manifest document in a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// Document was materialized; carries the number of topics written
    Mirrored { topics: usize },
    /// Prior output existed and the manifest did not request an update
    Skipped,
    /// Document failed; the batch recorded the error and moved on
    Failed { error: String },
}

/// One manifest document's record in the report
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub product: String,
    pub name: String,
    pub status: DocumentStatus,
}

/// Summary of one batch run
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub documents: Vec<DocumentRecord>,
}

impl BatchReport {
    pub fn mirrored_count(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Mirrored { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Skipped))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.documents
            .iter()
            .filter(|record| predicate(&record.status))
            .count()
    }
}

/// Formats a batch report as markdown
pub fn format_markdown_report(report: &BatchReport) -> String {
    let mut md = String::new();

    md.push_str("# Docmirror Batch Report\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Started**: {}\n",
        report.started_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at.to_rfc3339()
    ));
    let duration = (report.finished_at - report.started_at).num_seconds();
    md.push_str(&format!("- **Duration**: {}s\n\n", duration));

    md.push_str("## Totals\n\n");
    md.push_str(&format!("- **Documents**: {}\n", report.documents.len()));
    md.push_str(&format!("- **Mirrored**: {}\n", report.mirrored_count()));
    md.push_str(&format!("- **Skipped**: {}\n", report.skipped_count()));
    md.push_str(&format!("- **Failed**: {}\n\n", report.failed_count()));

    md.push_str("## Documents\n\n");
    md.push_str("| Product | Document | Outcome |\n");
    md.push_str("|---------|----------|--------|\n");
    for record in &report.documents {
        let outcome = match &record.status {
            DocumentStatus::Mirrored { topics } => format!("mirrored ({} topics)", topics),
            DocumentStatus::Skipped => "skipped".to_string(),
            DocumentStatus::Failed { error } => format!("failed: {}", error),
        };
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            record.product, record.name, outcome
        ));
    }

    md
}

/// Writes a batch report as markdown to the given path
pub fn write_report(report: &BatchReport, output_path: &Path) -> Result<()> {
    let markdown = format_markdown_report(report);
    std::fs::write(output_path, markdown).map_err(|source| MirrorError::Filesystem {
        path: output_path.to_path_buf(),
        source,
    })
}
