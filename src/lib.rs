//! Docmirror: a versioned-documentation mirroring tool
//!
//! This crate mirrors a remote hierarchical documentation source (a tree of
//! topics exposed through a small versioned content API) into a local,
//! numbered file hierarchy, with selective incremental re-crawling driven by
//! a manifest of documents.

pub mod api;
pub mod batch;
pub mod config;
pub mod materialize;
pub mod report;
pub mod update;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docmirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to resolve pretty URL '{pretty_url}': {message}")]
    Resolution { pretty_url: String, message: String },

    #[error("Failed to fetch version for document {document_id}: {message}")]
    Version {
        document_id: String,
        message: String,
    },

    #[error("Failed to fetch TOC for document {document_id}: {message}")]
    Toc {
        document_id: String,
        message: String,
    },

    #[error("Failed to fetch content for topic {topic_id}: {message}")]
    ContentFetch { topic_id: String, message: String },

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Manifest-specific errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias for docmirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for manifest operations
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

// Re-export commonly used types
pub use api::{ApiClient, TocNode};
pub use batch::{load_manifest, BatchDriver, Manifest};
pub use config::Config;
pub use materialize::{count_nodes, sanitize_title, Materializer, NumberingPath};
