//! static-host: a static content server built around a path-resolution core.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                  STATIC HOST                     │
//!                    │                                                  │
//!   Client Request   │  ┌─────────┐   ┌─────────┐   ┌──────────────┐   │
//!   ─────────────────┼─▶│   net   │──▶│  http   │──▶│   resolver   │   │
//!                    │  │listener │   │ server  │   │    engine    │   │
//!                    │  └─────────┘   └─────────┘   └──────┬───────┘   │
//!                    │                                     │ probes    │
//!                    │                                     ▼           │
//!                    │                              ┌──────────────┐   │
//!                    │                              │   content    │   │
//!                    │                              │ fs provider  │   │
//!                    │                              └──────┬───────┘   │
//!                    │                                     │           │
//!   Client Response  │  ┌──────────────────────────┐       │           │
//!   ◀────────────────┼──│ http response dispatcher │◀──────┘           │
//!                    │  │ 301 / file stream / 404  │                   │
//!                    │  └──────────────────────────┘                   │
//!                    │                                                  │
//!                    │  Cross-cutting: config (+ hot reload),          │
//!                    │  observability, lifecycle                       │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The resolver decides, per request, between serving a file, issuing a
//! single canonicalizing 301, and falling through to 404 — reconciling
//! trailing-slash policy, clean URLs and directory indexes without ever
//! producing a redirect chain.

// Core subsystems
pub mod config;
pub mod content;
pub mod http;
pub mod resolver;

// Plumbing
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
