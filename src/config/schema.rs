//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the static content server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, TLS, connection limits).
    pub listener: ListenerConfig,

    /// Mount definitions exposing directory trees under URL prefixes.
    pub mounts: Vec<MountConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
            max_connections: 10_000,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// A directory tree exposed under a URL prefix, with its own
/// canonicalization policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MountConfig {
    /// Mount identifier for logging/metrics.
    pub name: String,

    /// URL prefix this mount claims (e.g., "/" or "/docs").
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,

    /// Document root directory served by this mount.
    pub root: String,

    /// Trailing-slash canonicalization policy.
    #[serde(default)]
    pub trailing_slash: TrailingSlashPolicy,

    /// Hide `.html` extensions behind extensionless canonical URLs.
    #[serde(default)]
    pub clean_urls: bool,

    /// Mount priority (higher = matched first).
    #[serde(default)]
    pub priority: u32,
}

fn default_path_prefix() -> String {
    "/".to_string()
}

/// Trailing-slash policy as it appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrailingSlashPolicy {
    /// No preference.
    #[default]
    Unspecified,
    /// Directory-style URLs never end in `/`.
    ForceAbsent,
    /// Directory-style URLs always end in `/`.
    ForcePresent,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parses() {
        let config: ServerConfig = toml::from_str(
            r#"
            [[mounts]]
            name = "site"
            root = "./public"
            "#,
        )
        .unwrap();

        assert_eq!(config.mounts.len(), 1);
        assert_eq!(config.mounts[0].path_prefix, "/");
        assert_eq!(
            config.mounts[0].trailing_slash,
            TrailingSlashPolicy::Unspecified
        );
        assert!(!config.mounts[0].clean_urls);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_trailing_slash_policy_spelling() {
        let config: ServerConfig = toml::from_str(
            r#"
            [[mounts]]
            name = "docs"
            path_prefix = "/docs"
            root = "./docs"
            trailing_slash = "force_present"
            clean_urls = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.mounts[0].trailing_slash,
            TrailingSlashPolicy::ForcePresent
        );
        assert!(config.mounts[0].clean_urls);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert!(config.mounts.is_empty());
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(!config.observability.metrics_enabled);
    }
}
