//! filekv Server Binary
//!
//! Starts the TCP server for filekv.

use clap::Parser;
use filekv::network::Server;
use filekv::{Config, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// filekv Server
#[derive(Parser, Debug)]
#[command(name = "filekv-server")]
#[command(about = "Line-oriented TCP key-value server, one file per key")]
#[command(version)]
struct Args {
    /// Data directory (one file per key)
    #[arg(short, long, default_value = ".")]
    data_dir: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: String,

    /// Idle session timeout in milliseconds (0 disables)
    #[arg(short = 't', long, default_value = "0")]
    idle_timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filekv=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("filekv server v{}", filekv::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .listen_addr(&args.listen)
        .data_dir(&args.data_dir)
        .idle_timeout_ms(args.idle_timeout_ms)
        .build();

    // Open the store
    let store = match Store::open(&config.data_dir) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    // Bind and serve
    let server = match Server::bind(config, store) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to bind server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
