//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all resolution handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Drive the accept loop over the bounded listener
//! - Apply config reloads by swapping the mount table
//! - Serve plaintext HTTP/1 and TLS via axum-server
//!
//! # Design Decisions
//! - The handler performs no side effects besides the response; all path
//!   arithmetic lives in the resolver, all I/O in provider and dispatcher
//! - Mount table reads are lock-free (ArcSwap); reloads never stall traffic
//! - One task per connection; the permit and the tracker handle ride along
//!   so backpressure and drain survive handler panics

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use tokio::sync::{broadcast, mpsc};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::http::mounts::MountTable;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::http::response;
use crate::net::{ConnectionId, ConnectionTracker, Listener};
use crate::observability::metrics;
use crate::resolver::{self, Decision};

/// How long shutdown waits for in-flight connections.
const DRAIN_DEADLINE: Duration = Duration::from_secs(30);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub mounts: Arc<ArcSwap<MountTable>>,
}

/// HTTP server for the static content host.
pub struct HttpServer {
    router: Router,
    mounts: Arc<ArcSwap<MountTable>>,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let mounts = Arc::new(ArcSwap::from_pointee(MountTable::from_config(
            &config.mounts,
        )));

        let state = AppState {
            mounts: mounts.clone(),
        };
        let router = Self::build_router(&config, state);

        Self {
            router,
            mounts,
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(serve_handler))
            .route("/", any(serve_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Swap in the mount table of a freshly validated config.
    fn apply_config(&self, new_config: &ServerConfig) {
        let table = MountTable::from_config(&new_config.mounts);
        tracing::info!(mounts = table.len(), "Mount table replaced");
        self.mounts.store(Arc::new(table));
    }

    /// Run the plaintext server over the bounded listener.
    pub async fn run(
        self,
        listener: Listener,
        mut config_updates: mpsc::UnboundedReceiver<ServerConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let tracker = ConnectionTracker::new();
        let mut updates_open = true;

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                maybe_config = config_updates.recv(), if updates_open => {
                    match maybe_config {
                        Some(new_config) => self.apply_config(&new_config),
                        None => updates_open = false,
                    }
                }
                accepted = listener.accept() => {
                    let (stream, peer_addr, permit) = match accepted {
                        Ok(accepted) => accepted,
                        Err(err) => {
                            tracing::warn!(error = %err, "Accept failed");
                            continue;
                        }
                    };
                    let service = TowerToHyperService::new(self.router.clone());
                    let connection = tracker.register();
                    tokio::spawn(async move {
                        let conn_id = ConnectionId::new();
                        if let Err(err) = http1::Builder::new()
                            .serve_connection(TokioIo::new(stream), service)
                            .await
                        {
                            tracing::debug!(
                                connection = %conn_id,
                                peer_addr = %peer_addr,
                                error = %err,
                                "Connection closed with error"
                            );
                        }
                        drop(connection);
                        drop(permit);
                    });
                }
            }
        }

        tracker.drain(DRAIN_DEADLINE).await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the TLS server; axum-server owns the accept loop.
    pub async fn run_tls(
        self,
        listener: Listener,
        tls_config: RustlsConfig,
        mut config_updates: mpsc::UnboundedReceiver<ServerConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let handle = axum_server::Handle::new();

        // Reloads and shutdown are handled off to the side; axum-server only
        // sees the graceful-shutdown handle.
        let mounts = self.mounts.clone();
        let control = {
            let handle = handle.clone();
            tokio::spawn(async move {
                let mut updates_open = true;
                loop {
                    tokio::select! {
                        _ = shutdown.recv() => {
                            handle.graceful_shutdown(Some(DRAIN_DEADLINE));
                            break;
                        }
                        maybe_config = config_updates.recv(), if updates_open => {
                            match maybe_config {
                                Some(new_config) => {
                                    let table = MountTable::from_config(&new_config.mounts);
                                    tracing::info!(mounts = table.len(), "Mount table replaced");
                                    mounts.store(Arc::new(table));
                                }
                                None => updates_open = false,
                            }
                        }
                    }
                }
            })
        };

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::from_tcp_rustls(listener.into_std()?, tls_config)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        control.abort();
        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Catch-all handler: normalize, match mount, resolve, dispatch.
async fn serve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .request_id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let method = request.method().clone();
    let method_str = method.to_string();

    if method != Method::GET && method != Method::HEAD {
        let response = response::method_not_allowed();
        metrics::record_request(&method_str, response.status().as_u16(), "none", start_time);
        return response;
    }

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let parsed = resolver::Request::parse(&target);

    let mounts = state.mounts.load();
    let Some((mount, relative)) = mounts.match_path(&parsed.pathname) else {
        tracing::debug!(
            request_id = %request_id,
            path = %parsed.pathname,
            "No mount claims this path"
        );
        metrics::record_request(&method_str, 404, "none", start_time);
        return response::not_found();
    };

    let mount_request = resolver::Request::from_parts(relative, parsed.search);
    let response = match resolver::resolve(&mount_request, mount.options(), mount.provider()).await
    {
        Ok(Decision::ServeFile { path, descriptor }) => {
            tracing::debug!(
                request_id = %request_id,
                mount = mount.name(),
                path = %path,
                "Serving file"
            );
            response::file(&method, &path, &descriptor).await
        }
        Ok(Decision::Redirect { location }) => {
            let location = mount.prefix_location(&location);
            tracing::debug!(
                request_id = %request_id,
                mount = mount.name(),
                location = %location,
                "Redirecting to canonical URL"
            );
            response::redirect(&location)
        }
        Ok(Decision::Defer) => {
            tracing::debug!(
                request_id = %request_id,
                mount = mount.name(),
                path = %mount_request.pathname,
                "Nothing resolved, falling through"
            );
            response::not_found()
        }
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                mount = mount.name(),
                error = %err,
                "Resolution aborted by provider failure"
            );
            response::server_fault()
        }
    };

    metrics::record_request(
        &method_str,
        response.status().as_u16(),
        mount.name(),
        start_time,
    );
    response
}
