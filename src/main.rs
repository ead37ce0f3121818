//! # ki-admin Main Application Entry Point
//!
//! Parses the command line, initializes tracing and runs the dashboard server
//! until Ctrl-C is received.
//!
//! - First argument: Port number (defaults to 3000)
//! - Second argument: Path to configuration file (defaults to "config.json5")
//!
//! ## Example Usage
//!
//! ```bash
//! # Run with default settings (port 3000, default config)
//! cargo run
//!
//! # Run with a specific port and configuration file
//! cargo run 8080 my-config.json5
//! ```
//!
//! Log levels can be controlled through the `RUST_LOG` environment variable.

use ki_admin::error::CustomizerError;
use ki_admin::server;
use std::env;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), CustomizerError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let config_file_path = env::args().nth(2).map(PathBuf::from);

    tracing::info!("Starting ki-admin application");

    let cancel_token = CancellationToken::new();
    tokio::spawn({
        let cancel_token = cancel_token.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
                cancel_token.cancel();
            }
        }
    });

    server::run(port, config_file_path, cancel_token).await?;

    tracing::info!("ki-admin application shutting down");
    Ok(())
}
