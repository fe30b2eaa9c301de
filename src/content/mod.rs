//! Content lookup subsystem.
//!
//! # Data Flow
//! ```text
//! Resolution engine probe ("/foo/index.html")
//!     → provider.rs (ContentProvider contract)
//!     → fs.rs (document-root lookup via tokio::fs)
//!     → Some(FileDescriptor) | None | ProviderError
//! ```
//!
//! # Design Decisions
//! - The provider only answers "does content exist at this exact path";
//!   trailing-slash presence on the probe is significant
//! - Descriptors are opaque to the engine and consumed by the dispatcher
//! - A lookup fault is an error, never silently treated as absence

pub mod fs;
pub mod provider;

pub use fs::{FileDescriptor, FsProvider};
pub use provider::{ContentProvider, ProviderError};
