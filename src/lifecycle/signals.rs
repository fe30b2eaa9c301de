//! OS signal handling.
//!
//! # Responsibilities
//! - Translate SIGINT/SIGTERM into graceful shutdown
//! - Translate SIGHUP into a config reload request
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP reloads config, it never shuts the server down
//! - On non-unix targets only Ctrl+C is wired

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::ServerConfig;

/// Resolves when the process is asked to terminate (Ctrl+C or SIGTERM).
pub async fn terminate_requested() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Termination signal received");
}

/// Spawn a task that reloads `config_path` on SIGHUP and forwards the
/// validated result over the server's update channel.
///
/// No-op on non-unix targets.
pub fn spawn_reload_on_hangup(
    config_path: PathBuf,
    updates: mpsc::UnboundedSender<ServerConfig>,
) {
    #[cfg(unix)]
    {
        tokio::spawn(async move {
            let mut sighup = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup()) {
                Ok(sighup) => sighup,
                Err(err) => {
                    tracing::error!(error = %err, "Failed to install SIGHUP handler");
                    return;
                }
            };
            while sighup.recv().await.is_some() {
                tracing::info!(path = ?config_path, "SIGHUP received, reloading config");
                match load_config(&config_path) {
                    Ok(new_config) => {
                        if updates.send(new_config).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::error!(
                            error = %err,
                            "Rejected config reload, keeping current mounts"
                        );
                    }
                }
            }
        });
    }
    #[cfg(not(unix))]
    {
        let _ = (config_path, updates);
    }
}
