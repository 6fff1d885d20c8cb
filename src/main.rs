//! Dataset dashboard backend entry point.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dataset_dashboard::api::{create_router, AppState};
use dataset_dashboard::config::Config;
use dataset_dashboard::dataset::DatasetScanner;
use dataset_dashboard::metrics;
use dataset_dashboard::utils::shutdown_signal;

/// Dataset dashboard backend.
#[derive(Parser, Debug)]
#[command(name = "dataset-dashboard")]
#[command(about = "Serve metadata about the CSV datasets in a directory")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Directory to scan for CSV files (overrides DATA_DIR).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Bind address (overrides HOST).
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the dataset listing as JSON.
    List,

    /// Run the readiness check and exit non-zero when not ready.
    Check,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("dataset_dashboard=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(args.json_logs.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!args.json_logs).then(|| fmt::layer().with_writer(std::io::stderr)))
        .with(filter)
        .init();

    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    if args.data_dir.is_some() {
        config.data_dir = args.data_dir;
    }
    config.verbose |= args.verbose;

    match args.command {
        Some(Command::Serve { port, host }) => cmd_serve(config, port, host).await,
        Some(Command::List) => cmd_list(&config).await,
        Some(Command::Check) => cmd_check(&config).await,
        Some(Command::CheckConfig) => cmd_check_config(&config),
        None => cmd_serve(config, None, None).await,
    }
}

/// Validate the configuration and build a scanner for its data directory.
fn build_scanner(config: &Config) -> anyhow::Result<DatasetScanner> {
    let scanner = config.scanner().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!(data_dir = %scanner.data_dir().display(), "Using data directory");
    Ok(scanner)
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DATASET DASHBOARD - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    let data_dir = config.resolve_data_dir()?;

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Data Directory: {}", data_dir.display());
    println!(
        "  Directory Exists: {}",
        if data_dir.is_dir() { "yes" } else { "NO" }
    );
    println!("  Listen Address: {}", config.bind_addr());
    println!("  Log Level: {}", config.rust_log);
    println!("  Verbose: {}", config.verbose);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the dataset listing as pretty JSON.
async fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let scanner = build_scanner(config)?;

    let datasets = tokio::task::spawn_blocking(move || scanner.list_datasets()).await??;
    println!("{}", serde_json::to_string_pretty(&datasets)?);

    Ok(())
}

/// Print the readiness report; fail when not ready.
async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let scanner = build_scanner(config)?;

    let report = tokio::task::spawn_blocking(move || scanner.readiness_check()).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.ready {
        for message in &report.checks.errors {
            warn!("{}", message);
        }
        return Err(anyhow::anyhow!("Service not ready: status={}", report.status));
    }

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    mut config: Config,
    port_override: Option<u16>,
    host_override: Option<String>,
) -> anyhow::Result<()> {
    if let Some(port) = port_override {
        config.port = port;
    }
    if let Some(host) = host_override {
        config.host = host;
    }

    let scanner = build_scanner(&config)?;

    // Initialize metrics
    let mut app_state = AppState::new(scanner);
    match metrics::install_recorder() {
        Ok(handle) => {
            let upkeep = handle.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(5));
                loop {
                    interval.tick().await;
                    upkeep.run_upkeep();
                }
            });
            app_state = app_state.with_metrics(handle);
        }
        Err(e) => warn!("Metrics recorder unavailable: {}", e),
    }

    // Start HTTP server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(app_state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}
