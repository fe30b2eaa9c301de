//! The content existence contract consumed by the resolution engine.

use std::future::Future;

use thiserror::Error;

/// Errors a provider can surface during a lookup.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying store failed (I/O fault, permission problem).
    #[error("content lookup failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Answers "does content exist at this exact path".
///
/// `path` is always absolute and slash-normalized, relative to the mount the
/// provider backs. Trailing-slash presence is significant: `/foo` and
/// `/foo/index.html` are distinct lookups, and a trailing-slash path never
/// names a file.
pub trait ContentProvider: Send + Sync {
    /// Opaque handle meaning "content exists here"; passed through untouched
    /// to the dispatcher.
    type Descriptor: Send;

    /// Look up `path`. `Ok(None)` means absent; an `Err` aborts the whole
    /// resolution.
    fn exists(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Option<Self::Descriptor>, ProviderError>> + Send;
}
