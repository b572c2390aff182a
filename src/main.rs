//! Docmirror main entry point
//!
//! Command-line interface for mirroring versioned documentation into a local
//! numbered file hierarchy.

use anyhow::Context;
use clap::Parser;
use docmirror::batch::{load_manifest, BatchDriver};
use docmirror::config::{load_config_with_hash, Config};
use docmirror::report::{write_report, DocumentStatus, REPORT_FILENAME};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Docmirror: mirror versioned documentation into a numbered file tree
///
/// Docmirror resolves each manifest document against the content API, walks
/// its table of contents, and writes one numbered HTML file per topic plus a
/// single full-document file, skipping documents that are already mirrored.
#[derive(Parser, Debug)]
#[command(name = "docmirror")]
#[command(version = "0.1.0")]
#[command(about = "Mirror versioned documentation into a numbered file tree", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and manifest and show what would be mirrored without
    /// touching the network
    #[arg(long, conflicts_with = "document")]
    dry_run: bool,

    /// Mirror a single document by pretty URL instead of the whole manifest
    #[arg(long, value_name = "PRETTY_URL", requires_all = ["product", "name"])]
    document: Option<String>,

    /// Product folder the single document is filed under
    #[arg(long, requires = "document")]
    product: Option<String>,

    /// Display name of the single document
    #[arg(long, requires = "document")]
    name: Option<String>,

    /// Rebuild the single document even if output already exists
    #[arg(long, requires = "document")]
    update: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else if let Some(pretty_url) = &cli.document {
        // clap guarantees product and name are present alongside --document
        let product = cli.product.as_deref().unwrap_or_default();
        let name = cli.name.as_deref().unwrap_or_default();
        handle_single_document(config, pretty_url, product, name, cli.update).await?;
    } else {
        handle_batch(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docmirror=info,warn"),
            1 => EnvFilter::new("docmirror=debug,info"),
            2 => EnvFilter::new("docmirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and manifest and shows what
/// would be mirrored
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Docmirror Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Reader target: {}", config.api.reader_target);
    println!("  Locale container: {}", config.api.locale_container_class);

    println!("\nOutput:");
    println!("  Root: {}", config.output.root);

    let manifest_path = Path::new(&config.batch.manifest_path);
    let manifest = load_manifest(manifest_path)
        .with_context(|| format!("failed to load manifest from {}", manifest_path.display()))?;

    let mut linked = 0;
    let mut unlinked = 0;
    println!("\nManifest ({} products):", manifest.children.len());
    for product in &manifest.children {
        println!("  - {}", product.name);
        for doc in &product.children {
            match &doc.link {
                Some(link) => {
                    linked += 1;
                    let marker = if doc.update { " [update]" } else { "" };
                    println!("    * {} -> {}{}", doc.name, link, marker);
                }
                None => {
                    unlinked += 1;
                    println!("    * {} (no link, skipped)", doc.name);
                }
            }
        }
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would mirror {} documents ({} entries without links skipped)",
        linked, unlinked
    );

    Ok(())
}

/// Handles single-document mode
async fn handle_single_document(
    config: Config,
    pretty_url: &str,
    product: &str,
    name: &str,
    update: bool,
) -> anyhow::Result<()> {
    tracing::info!("Mirroring single document '{}' from {}", name, pretty_url);

    let driver = BatchDriver::new(config)?;
    let status = driver
        .mirror_document(product, name, pretty_url, update)
        .await?;

    match status {
        DocumentStatus::Mirrored { topics } => {
            println!("✓ Mirrored '{}' ({} topics)", name, topics);
        }
        DocumentStatus::Skipped => {
            println!("- Skipped '{}': output exists (pass --update to rebuild)", name);
        }
        DocumentStatus::Failed { error } => {
            // mirror_document surfaces failures as Err; this arm is for the
            // report-only variant and should not be reached here
            anyhow::bail!("mirror failed: {}", error);
        }
    }

    Ok(())
}

/// Handles the default batch mode over the configured manifest
async fn handle_batch(config: Config) -> anyhow::Result<()> {
    let manifest_path = Path::new(&config.batch.manifest_path);
    tracing::info!("Loading manifest from: {}", manifest_path.display());
    let manifest = load_manifest(manifest_path)
        .with_context(|| format!("failed to load manifest from {}", manifest_path.display()))?;

    let output_root = PathBuf::from(&config.output.root);
    std::fs::create_dir_all(&output_root)
        .with_context(|| format!("failed to create output root {}", output_root.display()))?;
    tracing::info!("Base output directory setup: {}", output_root.display());

    let driver = BatchDriver::new(config)?;
    let report = driver.run(&manifest).await?;

    let report_path = output_root.join(REPORT_FILENAME);
    write_report(&report, &report_path)?;

    println!(
        "✓ Batch complete: {} mirrored, {} skipped, {} failed",
        report.mirrored_count(),
        report.skipped_count(),
        report.failed_count()
    );
    println!("✓ Report written to: {}", report_path.display());

    if report.failed_count() > 0 {
        anyhow::bail!("{} document(s) failed to mirror", report.failed_count());
    }

    Ok(())
}
