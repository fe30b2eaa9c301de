use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;

use static_host::config::loader::load_config;
use static_host::config::watcher::ConfigWatcher;
use static_host::config::{MountConfig, ServerConfig};
use static_host::lifecycle::{signals, Shutdown};
use static_host::net::{tls, Listener};
use static_host::observability::{logging, metrics};
use static_host::HttpServer;

/// Static content server with canonicalizing path resolution.
#[derive(Parser)]
#[command(name = "static-host", version)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve a single directory at "/" (overrides configured mounts).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.mounts = vec![MountConfig {
            name: "root".to_string(),
            path_prefix: "/".to_string(),
            root: root.display().to_string(),
            trailing_slash: Default::default(),
            clean_urls: false,
            priority: 0,
        }];
    }
    if let Some(listen) = cli.listen {
        config.listener.bind_address = listen;
    }

    logging::init(&config.observability.log_level);
    tracing::info!("static-host v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mounts = config.mounts.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    if config.mounts.is_empty() {
        tracing::warn!("No mounts configured; every request will return 404");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Config updates flow in from the file watcher and from SIGHUP; both
    // are validated before they reach the server.
    let (config_updates, _watcher_guard) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            signals::spawn_reload_on_hangup(path.clone(), watcher.update_sender());
            let guard = watcher.run()?;
            (updates, Some(guard))
        }
        None => {
            let (_tx, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.listen_for_signals();

    let listener = Listener::bind(&config.listener).await?;
    let server = HttpServer::new(config.clone());

    match &config.listener.tls {
        Some(tls_config) => {
            let rustls_config = tls::load_tls_config(
                tls_config.cert_path.as_ref(),
                tls_config.key_path.as_ref(),
            )
            .await?;
            server
                .run_tls(listener, rustls_config, config_updates, server_shutdown)
                .await?;
        }
        None => {
            server.run(listener, config_updates, server_shutdown).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
