//! Value types consumed and produced by the resolution engine.

use thiserror::Error;

use crate::content::provider::ProviderError;
use crate::resolver::normalize::normalize;

/// Trailing-slash canonicalization policy for a mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingSlash {
    /// No preference; directory-style paths are canonicalized toward the
    /// form that is known to resolve.
    #[default]
    Unspecified,
    /// Directory-style paths never end in `/`.
    ForceAbsent,
    /// Directory-style paths always end in `/`.
    ForcePresent,
}

/// Per-mount resolution options, immutable for the duration of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    pub trailing_slash: TrailingSlash,
    pub clean_urls: bool,
}

/// A single request as seen by the resolution engine.
///
/// The pathname is multi-slash-collapsed and query-stripped; the search
/// string keeps its leading `?`. Both are relative to the mount the request
/// matched, so the engine never sees a mount prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub pathname: String,
    pub search: String,
    pub has_trailing_slash: bool,
}

impl Request {
    /// Parse a raw request target (path plus optional query) as received
    /// from the wire. An empty pathname normalizes to `/`.
    pub fn parse(raw_target: &str) -> Self {
        let (pathname, search) = normalize(raw_target);
        let pathname = if pathname.is_empty() {
            "/".to_string()
        } else {
            pathname
        };
        Self::from_parts(pathname, search)
    }

    /// Build a request from an already-normalized pathname and search string.
    ///
    /// Used by the mount layer after stripping the mount prefix. An empty
    /// pathname is kept as-is here: it denotes the mount root addressed
    /// without a trailing slash.
    pub fn from_parts(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        let pathname = pathname.into();
        let has_trailing_slash = pathname.ends_with('/');
        Self {
            pathname,
            search: search.into(),
            has_trailing_slash,
        }
    }
}

/// The engine's sole output: exactly one action per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision<D> {
    /// Content exists at `path`; the descriptor is forwarded untouched to
    /// the dispatcher.
    ServeFile { path: String, descriptor: D },
    /// Canonicalize via a single 301. The location always carries the
    /// original search string when one was present.
    Redirect { location: String },
    /// No decision could be made; control passes downstream.
    Defer,
}

impl<D> Decision<D> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Decision::Redirect { .. })
    }
}

/// Errors surfaced by the resolution engine.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The existence provider failed; resolution aborts immediately and the
    /// fault propagates unchanged, never retried.
    #[error("content provider failure: {0}")]
    Provider(#[from] ProviderError),
}
