use serde::Deserialize;

/// Main configuration structure for docmirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Content API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the documentation portal (e.g., "https://docs.example.com")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Rendering target passed to the content endpoint
    #[serde(rename = "reader-target", default = "default_reader_target")]
    pub reader_target: String,

    /// CSS class of the locale content container extracted from topic HTML
    #[serde(rename = "locale-container-class", default = "default_locale_class")]
    pub locale_container_class: String,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name sent in the User-Agent header
    pub name: String,

    /// Version sent in the User-Agent header
    pub version: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory the mirrored file tree is written under
    pub root: String,
}

/// Batch mode configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Path to the JSON manifest of products and documents
    #[serde(rename = "manifest-path", default = "default_manifest_path")]
    pub manifest_path: String,

    /// Abort the whole batch on the first failed document instead of
    /// recording the failure and continuing
    #[serde(rename = "fail-fast", default)]
    pub fail_fast: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
            fail_fast: false,
        }
    }
}

fn default_reader_target() -> String {
    "DESIGNED_READER".to_string()
}

fn default_locale_class() -> String {
    "content-locale-en-US".to_string()
}

fn default_manifest_path() -> String {
    "./doctree.json".to_string()
}
