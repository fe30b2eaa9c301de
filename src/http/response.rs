//! Decision execution: building the client-facing response.
//!
//! # Responsibilities
//! - Turn a Redirect decision into a 301 with a Location header
//! - Stream file content with a content-type derived from the URL path
//! - Map Defer to 404 and provider faults to 500
//!
//! # Design Decisions
//! - Files are streamed, never buffered whole
//! - The content-type comes from the resolved URL path, not the filesystem
//!   path, so clean-URL candidates keep their `.html` type
//! - A file that vanishes between the existence probe and the open races to
//!   404, not to a panic

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::Response;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::content::FileDescriptor;

/// Permanent redirect to a canonical location.
pub fn redirect(location: &str) -> Response {
    // Location is built from the request path, which may carry raw unicode
    // bytes; header values accept them as opaque octets.
    match HeaderValue::from_bytes(location.as_bytes()) {
        Ok(value) => Response::builder()
            .status(StatusCode::MOVED_PERMANENTLY)
            .header(header::LOCATION, value)
            .body(Body::empty())
            .unwrap(),
        Err(_) => {
            tracing::warn!(location, "Redirect location is not a legal header value");
            server_fault()
        }
    }
}

/// Stream the resolved file. `path` is the URL path the decision named;
/// the descriptor carries the filesystem location.
pub async fn file(method: &Method, path: &str, descriptor: &FileDescriptor) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, descriptor.len);

    if method == Method::HEAD {
        return builder.body(Body::empty()).unwrap();
    }

    match File::open(&descriptor.fs_path).await {
        Ok(file) => builder.body(Body::from_stream(ReaderStream::new(file))).unwrap(),
        Err(err) => {
            tracing::warn!(
                path,
                fs_path = ?descriptor.fs_path,
                error = %err,
                "Resolved file disappeared before open"
            );
            not_found()
        }
    }
}

/// Nothing claimed the request.
pub fn not_found() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from("Not found"))
        .unwrap()
}

/// The content provider failed.
pub fn server_fault() -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from("Internal server error"))
        .unwrap()
}

/// Only GET and HEAD reach the resolver.
pub fn method_not_allowed() -> Response {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(header::ALLOW, "GET, HEAD")
        .body(Body::from("Method not allowed"))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_carries_location() {
        let response = redirect("/foo/?q=1");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/foo/?q=1"
        );
    }

    #[test]
    fn test_redirect_accepts_unicode_location() {
        let response = redirect("/caf\u{e9}/");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[test]
    fn test_method_not_allowed_names_allowed_methods() {
        let response = method_not_allowed();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET, HEAD");
    }

    #[tokio::test]
    async fn test_head_sends_headers_without_body() {
        let root = std::env::temp_dir().join(format!(
            "static-host-response-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&root).unwrap();
        let fs_path = root.join("page.html");
        std::fs::write(&fs_path, "hello").unwrap();

        let descriptor = FileDescriptor {
            fs_path,
            len: 5,
            modified: None,
        };
        let response = file(&Method::HEAD, "/page.html", &descriptor).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
        assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "5");
        let body = axum::body::to_bytes(response.into_body(), 16).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_vanished_file_races_to_not_found() {
        let descriptor = FileDescriptor {
            fs_path: "/no/such/file.html".into(),
            len: 0,
            modified: None,
        };
        let response = file(&Method::GET, "/file.html", &descriptor).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
