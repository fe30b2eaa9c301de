//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check mount integrity (unique names, absolute prefixes, real roots)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before a config is accepted into the system, including on reload

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("duplicate mount name '{0}'")]
    DuplicateMountName(String),

    #[error("mount '{0}': path_prefix '{1}' must start with '/'")]
    PrefixNotAbsolute(String, String),

    #[error("mount '{0}': root directory is empty")]
    EmptyRoot(String),

    #[error("mounts '{0}' and '{1}' claim path_prefix '{2}' at the same priority")]
    ConflictingMounts(String, String, String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

/// Check everything serde cannot, collecting all problems.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let mut names = HashSet::new();
    for mount in &config.mounts {
        if !names.insert(mount.name.as_str()) {
            errors.push(ValidationError::DuplicateMountName(mount.name.clone()));
        }
        if !mount.path_prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotAbsolute(
                mount.name.clone(),
                mount.path_prefix.clone(),
            ));
        }
        if mount.root.is_empty() {
            errors.push(ValidationError::EmptyRoot(mount.name.clone()));
        }
    }

    for (i, a) in config.mounts.iter().enumerate() {
        for b in config.mounts.iter().skip(i + 1) {
            if a.path_prefix == b.path_prefix && a.priority == b.priority {
                errors.push(ValidationError::ConflictingMounts(
                    a.name.clone(),
                    b.name.clone(),
                    a.path_prefix.clone(),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
