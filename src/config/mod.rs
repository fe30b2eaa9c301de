//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → mount table compiled and shared via ArcSwap
//!
//! On reload signal:
//!     watcher.rs detects change (or SIGHUP asks for one)
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server swaps the compiled mount table atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::ListenerConfig;
pub use schema::MountConfig;
pub use schema::ServerConfig;
pub use schema::TrailingSlashPolicy;
