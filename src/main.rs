//! nested-router
//!
//! Serves a small site whose pages are composed from nested layouts.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /payment
//!         │
//!         ▼
//!   ┌───────────┐    ┌───────────────┐    ┌──────────────────────────────┐
//!   │   http    │───▶│    routing    │───▶│            render            │
//!   │  server   │    │  tree.resolve │    │ root shell                   │
//!   └───────────┘    └───────────────┘    │  └─ settings shell           │
//!         ▲                               │      └─ payment page         │
//!         │                               └──────────────┬───────────────┘
//!         │          ┌───────────────┐                   │
//!         └──────────│ view (HTML)   │◀──────────────────┘
//!                    └───────────────┘
//!
//!   config (TOML + watcher) · observability (tracing, metrics) · lifecycle
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use nested_router::cli::{apply_bind_override, list_routes, render_page};
use nested_router::config::{load_config, ConfigWatcher, SiteConfig};
use nested_router::observability::{init_logging, metrics};
use nested_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "nested-router", version)]
#[command(about = "Nested layout routing demo site", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site over HTTP (default)
    Serve {
        /// Override listener.bind_address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Render one path to stdout
    Render {
        path: String,
        /// Print the page markup without the document wrapper
        #[arg(long)]
        fragment: bool,
    },
    /// Print the route tree
    Routes {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    init_logging(&config.observability);

    let output = match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => {
            let config = apply_bind_override(config, bind)?;
            return serve(config, cli.config).await;
        }
        Commands::Render { path, fragment } => render_page(&config, &path, fragment)?,
        Commands::Routes { json } => list_routes(&config, json)?,
    };

    print!("{}", output.stdout);
    if output.exit_code != 0 {
        std::process::exit(output.exit_code);
    }
    Ok(())
}

async fn serve(
    config: SiteConfig,
    config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("nested-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        devtools = config.render.devtools,
        case_sensitive = config.routing.case_sensitive,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher alive for the whole run.
    let (_watcher, config_updates) = match &config_path {
        Some(path) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            (Some(watcher.run()?), rx)
        }
        None => {
            let (_, rx) = mpsc::unbounded_channel();
            (None, rx)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
