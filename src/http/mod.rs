//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (accept loop / axum setup, protocol handling)
//!     → request.rs (request ID stamping)
//!     → mounts.rs (prefix match, mount-relative request)
//!     → resolver (ServeFile | Redirect | Defer)
//!     → response.rs (301 / file stream / 404 / 500)
//!     → Send to client
//! ```

pub mod mounts;
pub mod request;
pub mod response;
pub mod server;

pub use mounts::{Mount, MountTable};
pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
