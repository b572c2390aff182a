//! Configuration module for docmirror
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Everything the mirror needs at runtime (API base URL, output root,
//! reader target) lives in an explicit [`Config`] value passed into the
//! components that use it; there is no ambient global configuration.
//!
//! # Example
//!
//! ```no_run
//! use docmirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Mirroring {} into {}", config.api.base_url, config.output.root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, BatchConfig, Config, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
