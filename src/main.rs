//! Procurement-Scout main entry point
//!
//! This is the command-line trigger for a single scraper run.

use clap::Parser;
use procurement_scout::config::{load_config_or_default, load_config_with_hash, Config};
use procurement_scout::engine::Engine;
use procurement_scout::output::{print_statistics, write_json};
use procurement_scout::sources::register_enabled;
use procurement_scout::ScoutError;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Procurement-Scout: scrape open government solicitations
///
/// Runs every enabled site adapter in parallel, prints a per-adapter
/// summary and optionally writes the collected records as JSON.
#[derive(Parser, Debug)]
#[command(name = "procurement-scout")]
#[command(version)]
#[command(about = "Scrape open government solicitations", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults if absent)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the run deadline in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Write the collected solicitations to this JSON file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and list the adapters that would run, without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), ScoutError> {
    let cli = Cli::parse();

    let existing = cli.config.as_deref().filter(|p| p.exists());
    let (config, hash) = match existing {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            (config, Some(hash))
        }
        None => (load_config_or_default(cli.config.as_deref())?, None),
    };

    setup_logging(cli.verbose, cli.quiet, &config.logging.level);

    match (existing, hash) {
        (Some(path), Some(hash)) => {
            tracing::info!(path = %path.display(), hash = %hash, "Configuration loaded")
        }
        _ => tracing::info!("Using built-in configuration"),
    }

    let mut engine = Engine::new();
    let registered = register_enabled(&mut engine, &config)?;
    tracing::info!(registered, "Adapters registered");

    if cli.dry_run {
        handle_dry_run(&config, &engine);
        return Ok(());
    }

    let timeout = cli
        .timeout
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.engine.run_timeout());

    handle_run(&engine, timeout, cli.output).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, level: &str) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new(format!(
                "procurement_scout={},warn",
                level.to_ascii_lowercase()
            )),
            1 => EnvFilter::new("procurement_scout=debug,info"),
            2 => EnvFilter::new("procurement_scout=trace,debug"),
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

/// Handles --dry-run: shows configuration and registered adapters
fn handle_dry_run(config: &Config, engine: &Engine) {
    println!("=== Procurement-Scout Dry Run ===\n");

    println!("Engine:");
    println!("  Run timeout: {}s", config.engine.run_timeout_secs);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);
    println!("  Connect timeout: {}s", config.http.connect_timeout_secs);

    println!("\nGeorgia Procurement Registry:");
    println!("  Enabled: {}", config.georgia_gpr.enabled);
    println!("  Landing: {}", config.georgia_gpr.base_url);
    println!("  Search: {}", config.georgia_gpr.search_url);
    println!("  Details: {}", config.georgia_gpr.details_url);
    println!("  Page size: {}", config.georgia_gpr.page_size);
    println!(
        "  Politeness delay: {}ms",
        config.georgia_gpr.politeness_delay_ms
    );

    println!("\nRegistered adapters ({}):", engine.len());
    for name in engine.adapter_names() {
        println!("  - {}", name);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape run
async fn handle_run(
    engine: &Engine,
    timeout: Duration,
    output: Option<PathBuf>,
) -> Result<(), ScoutError> {
    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling run");
            on_signal.cancel();
        }
    });

    tracing::info!(timeout_secs = timeout.as_secs(), "Launching scraper run");
    let report = engine.run_with_timeout(&shutdown, timeout).await;

    print_statistics(&report);

    if let Some(path) = output {
        write_json(&report.solicitations, &path)?;
        println!("\n✓ Solicitations written to: {}", path.display());
    }

    Ok(())
}
