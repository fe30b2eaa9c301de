//! Path resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Raw request target ("/foo//bar?q=1")
//!     → normalize.rs (split query, collapse slashes)
//!     → Request { pathname, search, has_trailing_slash }
//!     → engine.rs (exact match → directory index → clean-URL suffix)
//!     → Decision: ServeFile | Redirect | Defer
//! ```
//!
//! # Design Decisions
//! - The engine is a pure function of request × options × provider answers;
//!   no state survives between requests
//! - Existence checks run strictly in sequence (each probe is conditioned
//!   on the previous one missing)
//! - Every redirect targets a path whose existence was established during
//!   the same resolution, so a redirect can never chain into another

pub mod decision;
pub mod engine;
pub mod normalize;

pub use decision::{Decision, Request, ResolveError, ResolveOptions, TrailingSlash};
pub use engine::resolve;
