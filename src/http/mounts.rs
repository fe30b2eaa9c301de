//! Mount lookup and base-path handling.
//!
//! # Responsibilities
//! - Compile mount configs into an immutable, ordered table
//! - Match request paths to mounts (prefix match, segment-boundary aware)
//! - Strip the mount prefix on the way in, re-apply it to redirect
//!   locations on the way out
//!
//! # Design Decisions
//! - Mounts compiled at startup (and on reload), immutable at runtime
//! - Higher priority wins, then the longer prefix; deterministic order
//! - The resolver only ever sees mount-relative paths, so all of its path
//!   arithmetic is agnostic to where the mount hangs

use crate::config::{MountConfig, TrailingSlashPolicy};
use crate::content::FsProvider;
use crate::resolver::{ResolveOptions, TrailingSlash};

/// One compiled mount: a document root under a URL prefix with its
/// canonicalization policy.
#[derive(Debug, Clone)]
pub struct Mount {
    name: String,
    prefix: String,
    priority: u32,
    options: ResolveOptions,
    provider: FsProvider,
}

impl Mount {
    fn from_config(config: &MountConfig) -> Self {
        // "/docs/" and "/docs" are the same mount point.
        let prefix = if config.path_prefix.len() > 1 {
            config
                .path_prefix
                .trim_end_matches('/')
                .to_string()
        } else {
            config.path_prefix.clone()
        };
        Self {
            name: config.name.clone(),
            prefix,
            priority: config.priority,
            options: ResolveOptions {
                trailing_slash: config.trailing_slash.into(),
                clean_urls: config.clean_urls,
            },
            provider: FsProvider::new(config.root.as_str()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    pub fn provider(&self) -> &FsProvider {
        &self.provider
    }

    /// The mount-relative remainder of `pathname`, or `None` when this
    /// mount does not claim it. An exact prefix hit yields the empty string.
    fn strip_prefix(&self, pathname: &str) -> Option<String> {
        if self.prefix == "/" {
            return Some(pathname.to_string());
        }
        if pathname == self.prefix {
            return Some(String::new());
        }
        pathname
            .strip_prefix(&self.prefix)
            .filter(|rest| rest.starts_with('/'))
            .map(|rest| rest.to_string())
    }

    /// Re-apply the mount prefix to a mount-relative redirect location.
    pub fn prefix_location(&self, location: &str) -> String {
        if self.prefix == "/" {
            location.to_string()
        } else {
            format!("{}{}", self.prefix, location)
        }
    }
}

impl From<TrailingSlashPolicy> for TrailingSlash {
    fn from(policy: TrailingSlashPolicy) -> Self {
        match policy {
            TrailingSlashPolicy::Unspecified => TrailingSlash::Unspecified,
            TrailingSlashPolicy::ForceAbsent => TrailingSlash::ForceAbsent,
            TrailingSlashPolicy::ForcePresent => TrailingSlash::ForcePresent,
        }
    }
}

/// All mounts, ordered for matching. Swapped atomically on config reload.
#[derive(Debug, Default)]
pub struct MountTable {
    mounts: Vec<Mount>,
}

impl MountTable {
    pub fn from_config(configs: &[MountConfig]) -> Self {
        let mut mounts: Vec<Mount> = configs.iter().map(Mount::from_config).collect();
        mounts.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.prefix.len().cmp(&a.prefix.len()))
        });
        Self { mounts }
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// First mount claiming `pathname`, plus the mount-relative remainder.
    pub fn match_path<'a>(&'a self, pathname: &str) -> Option<(&'a Mount, String)> {
        self.mounts
            .iter()
            .find_map(|mount| mount.strip_prefix(pathname).map(|rel| (mount, rel)))
    }
}
