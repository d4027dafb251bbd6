//! Mcp-Harvest main entry point
//!
//! This is the command-line interface for the directory importer.

use clap::Parser;
use mcp_harvest::config::{load_config_with_hash, Config};
use mcp_harvest::storage::{ProjectStore, SqliteStore};
use mcp_harvest::Harvester;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Mcp-Harvest: import MCP server listings into a projects database
///
/// Mcp-Harvest walks the remote directory's paginated listing API, keeps
/// the listings scraped from GitHub, and imports them as project records.
/// Failures during a run are reported in the final summary, not raised.
#[derive(Parser, Debug)]
#[command(name = "mcp-harvest")]
#[command(version)]
#[command(about = "Import MCP server listings into a projects database", long_about = None)]
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

    /// Validate config and show what would run without fetching anything
    #[arg(long, conflicts_with_all = ["probe", "stats"])]
    dry_run: bool,

    /// Fetch one page and test a single temporary insert, then exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    probe: bool,

    /// Show statistics from the projects database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "probe"])]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.probe {
        handle_probe(config).await?;
    } else {
        handle_import(config).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mcp_harvest=info,warn"),
            1 => EnvFilter::new("mcp_harvest=debug,info"),
            2 => EnvFilter::new("mcp_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &Config) {
    println!("=== Mcp-Harvest Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", config.source.base_url);
    println!("  Timeout: {}s", config.source.timeout_secs);
    println!("  Page delay: {}ms", config.source.page_delay_ms);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would import GitHub-sourced listings into the projects table");
}

/// Handles the --stats mode: shows statistics from the projects database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = SqliteStore::new(Path::new(&config.output.database_path))?;

    let total = store.count_projects()?;
    println!("Projects: {}", total);

    let by_category = store.count_by_category()?;
    if !by_category.is_empty() {
        println!("\nBy category:");
        for (category, count) in by_category {
            println!("  {:<24} {}", category, count);
        }
    }

    Ok(())
}

/// Handles the --probe mode: one page fetch plus a temporary insert
async fn handle_probe(config: Config) -> anyhow::Result<()> {
    let store = SqliteStore::new(Path::new(&config.output.database_path))?;
    let mut harvester = Harvester::new(config, store)?;

    let report = harvester.probe().await?;

    println!("=== Probe Results ===\n");
    println!("Total listings reported: {}", report.total_count);
    println!("Listings on first page:  {}", report.first_page_count);
    println!("GitHub-sourced of those: {}", report.github_count);
    match report.sample_name {
        Some(name) if report.probe_inserted => {
            println!("\n✓ Probe insert for '{}' succeeded and was cleaned up", name);
        }
        Some(name) => {
            println!("\n✗ Probe insert for '{}' failed, see log for details", name);
        }
        None => {
            println!("\nNo GitHub-sourced listing available for the insert probe");
        }
    }

    Ok(())
}

/// Handles the main import operation
async fn handle_import(config: Config) -> anyhow::Result<()> {
    let store = SqliteStore::new(Path::new(&config.output.database_path))?;
    let mut harvester = Harvester::new(config, store)?;

    // Stop at the next page boundary on Ctrl-C
    let cancel = harvester.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page before stopping");
            cancel.cancel();
        }
    });

    // Mirror progress snapshots into the debug log
    let mut progress = harvester.subscribe();
    tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let snapshot = progress.borrow_and_update().clone();
            if !snapshot.message.is_empty() {
                tracing::debug!(
                    "progress: page {}/{}, imported {}: {}",
                    snapshot.current_page,
                    snapshot.total_pages,
                    snapshot.total_imported,
                    snapshot.message
                );
            }
        }
    });

    let summary = harvester.run().await;

    println!("=== Import Summary ===\n");
    println!("Pages fetched:     {}", summary.pages_fetched);
    println!("Listings seen:     {}", summary.listings_seen);
    println!("GitHub-sourced:    {}", summary.listings_matched);
    println!("Imported:          {}", summary.total_imported);

    if !summary.failures.is_empty() {
        println!("\nRejected records ({}):", summary.failures.len());
        for failure in &summary.failures {
            println!("  {} - {}", failure.name, failure.error);
        }
    }

    // A run that ended on a transport error still exits zero: the outcome
    // is reported here and through the progress channel.
    if let Some(error) = &summary.error {
        println!("\nRun stopped early: {}", error);
    }

    Ok(())
}
