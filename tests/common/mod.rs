//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;

use static_host::config::{MountConfig, ServerConfig, TrailingSlashPolicy};
use static_host::lifecycle::Shutdown;
use static_host::net::Listener;
use static_host::HttpServer;

/// The content tree most scenarios run against.
pub const TREE: &[(&str, &str)] = &[
    ("foo.html", "foo.html content"),
    ("foo/index.html", "foo/index.html content"),
    ("foo/bar.html", "foo/bar.html content"),
];

/// Fresh scratch directory for one test, keyed by port for uniqueness.
pub fn content_root(port: u16) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "static-host-it-{}-{}",
        port,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();
    root
}

/// Lay the given files out under `root`, creating parent directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }
}

/// Single-mount config at "/" over `root`.
pub fn single_mount_config(
    port: u16,
    root: &Path,
    trailing_slash: TrailingSlashPolicy,
    clean_urls: bool,
) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = format!("127.0.0.1:{port}");
    config.mounts.push(MountConfig {
        name: "site".into(),
        path_prefix: "/".into(),
        root: root.display().to_string(),
        trailing_slash,
        clean_urls,
        priority: 0,
    });
    config
}

/// Start a server for `config` in the background.
///
/// The returned coordinator must be held for the server's lifetime;
/// dropping it shuts the server down.
pub async fn start_server(config: ServerConfig) -> Shutdown {
    let bind_address = config.listener.bind_address.clone();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (_config_tx, config_updates) = mpsc::unbounded_channel();

    let listener = Listener::bind(&config.listener).await.unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    wait_until_ready(bind_address.parse().unwrap()).await;
    shutdown
}

/// Spin until the server accepts connections (bounded).
async fn wait_until_ready(addr: SocketAddr) {
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server at {addr} never became ready");
}

/// Client that surfaces redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
