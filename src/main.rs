//! Route catalogue service (v1)
//!
//! Reads routing registry files, builds the resource catalogue and serves it
//! through an authenticated admin API.
//!
//! # Architecture Overview
//!
//! ```text
//!   registry files ──┐
//!   (TOML, merged)   │     ┌──────────────┐    ┌──────────────┐    ┌────────────┐
//!                    ├────▶│   registry   │───▶│  catalogue   │───▶│   admin    │◀── HTTP
//!   watcher / SIGHUP ┘     │  composite   │    │ dedup+resolve│    │   router   │
//!                          └──────────────┘    │  ArcSwap     │    └────────────┘
//!                                              └──────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use route_catalogue::catalogue::Catalogue;
use route_catalogue::config::{load_config, CatalogueConfig, RegistryWatcher};
use route_catalogue::http::AdminServer;
use route_catalogue::lifecycle::{build_catalogue, run_refresh_loop, signals, Shutdown};
use route_catalogue::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "route-catalogue")]
#[command(about = "Catalogue of URL patterns and accepted HTTP methods", long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "catalogue.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the admin API (default)
    Serve,
    /// Build the catalogue once and print it
    Print,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init_logging(&config.observability);
    tracing::info!(config = ?cli.config, "route-catalogue v{} starting", env!("CARGO_PKG_VERSION"));

    let catalogue = Arc::new(build_catalogue(&config)?);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Print => {
            print_catalogue(&catalogue);
            Ok(())
        }
        Commands::Serve => serve(config, catalogue).await,
    }
}

async fn serve(
    config: CatalogueConfig,
    catalogue: Arc<Catalogue>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.server.bind_address,
        sources = config.registry.sources.len(),
        watch = config.registry.watch,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let shutdown = Shutdown::new();
    signals::spawn_shutdown_listener(&shutdown);

    let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
    signals::spawn_hangup_listener(refresh_tx.clone());

    // Kept alive for the lifetime of the server.
    let _watcher = if config.registry.watch {
        let watcher = RegistryWatcher::new(
            config.registry.sources.clone(),
            Duration::from_secs(config.registry.poll_interval_secs),
            refresh_tx.clone(),
        );
        Some(watcher.run()?)
    } else {
        None
    };
    drop(refresh_tx);

    let reload = tokio::spawn(run_refresh_loop(
        catalogue.clone(),
        refresh_rx,
        shutdown.subscribe(),
    ));

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    AdminServer::new(config, catalogue).run(listener, shutdown).await?;
    let _ = reload.await;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_catalogue(catalogue: &Catalogue) {
    let snapshot = catalogue.snapshot();
    for resource in &snapshot.resources {
        println!("{:<8}{}", resource.verb.as_str(), resource.pattern);
    }
    for diagnostic in &snapshot.diagnostics {
        eprintln!(
            "warning: {} handler={} pattern={} {}",
            diagnostic.kind,
            diagnostic.handler,
            diagnostic.pattern.as_deref().unwrap_or("-"),
            diagnostic.detail
        );
    }
}
