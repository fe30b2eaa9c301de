//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → tls.rs (optional TLS termination via axum-server)
//!     → connection.rs (IDs, drain tracking for graceful shutdown)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Bounded accept queue prevents resource exhaustion
//! - Each connection tracked so shutdown can drain in-flight work
//! - TLS is optional and terminates before the HTTP layer sees bytes

pub mod connection;
pub mod listener;
pub mod tls;

pub use connection::{ConnectionId, ConnectionTracker};
pub use listener::{Listener, ListenerError};
