//! Patient record service entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mini_emr::api::{create_router, AppState};
use mini_emr::config::Config;
use mini_emr::metrics::{HttpMetrics, UPKEEP_INTERVAL};
use mini_emr::utils::shutdown_signal;

/// Minimal in-memory patient record service.
#[derive(Parser, Debug)]
#[command(name = "mini-emr")]
#[command(about = "In-memory patient records with Prometheus metrics")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Interface to bind (overrides HOST).
    #[arg(long, global = true)]
    host: Option<String>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    if let Some(host) = args.host.clone() {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("mini_emr=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("MINI EMR - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    if let Err(e) = config.validate() {
        println!("FAILED");
        println!("  Error: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed"));
    }
    println!("OK");

    print!("Resolving bind address... ");
    let addr = config.bind_addr()?;
    println!("OK");

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen: {}", addr);
    println!("  Log level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    let metrics = HttpMetrics::new()?;
    let app_state = AppState::new(metrics);

    // The recorder has no upkeep task of its own.
    let upkeep_metrics = Arc::clone(&app_state.metrics);
    let upkeep_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            ticker.tick().await;
            upkeep_metrics.run_upkeep();
        }
    });

    let router = create_router(app_state);

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    upkeep_handle.abort();
    info!("HTTP server stopped");
    Ok(())
}
