//! The path resolution engine.
//!
//! # Responsibilities
//! - Decide, per request, between serving a file, redirecting to a
//!   canonical URL, and deferring to the surrounding pipeline
//! - Reconcile two canonicalization policies (trailing slash, clean URLs)
//!   with directory-index resolution
//!
//! # Design Decisions
//! - Exact match wins: it is the least surprising and the cheapest check
//! - The directory index is probed before the clean-URL suffix; an index
//!   file is an unambiguous "this is a directory" signal, a bare `.html`
//!   sibling is only a guess
//! - Trailing-slash policy is applied only after existence is confirmed, so
//!   every redirect points at a URL already known to resolve

use crate::content::provider::ContentProvider;
use crate::resolver::decision::{Decision, Request, ResolveError, ResolveOptions, TrailingSlash};
use crate::resolver::normalize::remove_trailing_slash;

/// Resolve one request against the existence provider.
///
/// Probes run strictly in sequence; each later probe is conditioned on the
/// earlier ones missing, so they must never be issued concurrently. A
/// provider failure aborts resolution and is propagated unchanged.
pub async fn resolve<P: ContentProvider>(
    request: &Request,
    options: &ResolveOptions,
    provider: &P,
) -> Result<Decision<P::Descriptor>, ResolveError> {
    // Step 1: exact match.
    if let Some(descriptor) = provider.exists(&request.pathname).await? {
        if options.clean_urls {
            if let Some(stripped) = request.pathname.strip_suffix(".html") {
                let bare = stripped.strip_suffix("/index").unwrap_or(stripped);
                let target = if options.trailing_slash == TrailingSlash::ForcePresent {
                    format!("{bare}/")
                } else {
                    bare.to_string()
                };
                return Ok(Decision::Redirect {
                    location: location(&target, &request.search),
                });
            }
        }
        return Ok(Decision::ServeFile {
            path: request.pathname.clone(),
            descriptor,
        });
    }

    // Step 2: directory index.
    let index_path = join_index(&request.pathname);
    if let Some(descriptor) = provider.exists(&index_path).await? {
        let decision = match options.trailing_slash {
            TrailingSlash::Unspecified
                if !request.has_trailing_slash && !options.clean_urls =>
            {
                Decision::Redirect {
                    location: location(&format!("{}/", request.pathname), &request.search),
                }
            }
            TrailingSlash::ForceAbsent
                if request.has_trailing_slash && request.pathname != "/" =>
            {
                Decision::Redirect {
                    location: location(
                        remove_trailing_slash(&request.pathname),
                        &request.search,
                    ),
                }
            }
            TrailingSlash::ForcePresent if !request.has_trailing_slash => Decision::Redirect {
                location: location(&format!("{}/", request.pathname), &request.search),
            },
            _ => Decision::ServeFile {
                path: index_path,
                descriptor,
            },
        };
        return Ok(decision);
    }

    // Step 3: clean-URL suffix.
    if options.clean_urls {
        let base = if request.has_trailing_slash {
            // A trailing-slash request only maps onto a `.html` sibling when
            // a trailing-slash policy is in force; under Unspecified we do
            // not guess.
            if options.trailing_slash == TrailingSlash::Unspecified {
                None
            } else {
                Some(remove_trailing_slash(&request.pathname))
            }
        } else {
            Some(request.pathname.as_str())
        };

        if let Some(base) = base {
            let candidate = format!("{base}.html");
            if let Some(descriptor) = provider.exists(&candidate).await? {
                if options.trailing_slash == TrailingSlash::ForceAbsent
                    && request.has_trailing_slash
                {
                    return Ok(Decision::Redirect {
                        location: location(
                            remove_trailing_slash(&request.pathname),
                            &request.search,
                        ),
                    });
                }
                if options.trailing_slash == TrailingSlash::ForcePresent
                    && !request.has_trailing_slash
                {
                    let bare = base.strip_suffix("/index").unwrap_or(base);
                    return Ok(Decision::Redirect {
                        location: location(&format!("{bare}/"), &request.search),
                    });
                }
                if let Some(bare) = candidate.strip_suffix("/index.html") {
                    return Ok(Decision::Redirect {
                        location: location(bare, &request.search),
                    });
                }
                return Ok(Decision::ServeFile {
                    path: candidate,
                    descriptor,
                });
            }
        }
    }

    // Step 4: nothing matched.
    Ok(Decision::Defer)
}

/// Build a redirect location, normalizing an empty path to `/`.
fn location(path: &str, search: &str) -> String {
    let path = if path.is_empty() { "/" } else { path };
    format!("{path}{search}")
}

/// Append `index.html` with exactly one joining slash.
fn join_index(pathname: &str) -> String {
    if pathname.ends_with('/') {
        format!("{pathname}index.html")
    } else {
        format!("{pathname}/index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::provider::{ContentProvider, ProviderError};
    use std::collections::HashSet;

    /// In-memory provider: a set of paths that exist, descriptor echoes the
    /// path back so tests can assert which probe matched.
    struct MapProvider {
        entries: HashSet<String>,
    }

    impl MapProvider {
        fn new(paths: &[&str]) -> Self {
            Self {
                entries: paths.iter().map(|p| p.to_string()).collect(),
            }
        }
    }

    impl ContentProvider for MapProvider {
        type Descriptor = String;

        async fn exists(&self, path: &str) -> Result<Option<String>, ProviderError> {
            Ok(self.entries.contains(path).then(|| path.to_string()))
        }
    }

    struct FaultyProvider;

    impl ContentProvider for FaultyProvider {
        type Descriptor = ();

        async fn exists(&self, _path: &str) -> Result<Option<()>, ProviderError> {
            Err(ProviderError::Io(std::io::Error::other("disk fault")))
        }
    }

    fn options(trailing_slash: TrailingSlash, clean_urls: bool) -> ResolveOptions {
        ResolveOptions {
            trailing_slash,
            clean_urls,
        }
    }

    /// The content tree shared by most scenarios.
    fn tree() -> MapProvider {
        MapProvider::new(&["/foo.html", "/foo/index.html", "/foo/bar.html"])
    }

    async fn run(target: &str, opts: ResolveOptions, provider: &MapProvider) -> Decision<String> {
        resolve(&Request::parse(target), &opts, provider)
            .await
            .unwrap()
    }

    fn redirect(location: &str) -> Decision<String> {
        Decision::Redirect {
            location: location.to_string(),
        }
    }

    fn serve(path: &str) -> Decision<String> {
        Decision::ServeFile {
            path: path.to_string(),
            descriptor: path.to_string(),
        }
    }

    #[tokio::test]
    async fn test_default_config_scenarios() {
        let provider = tree();
        let opts = options(TrailingSlash::Unspecified, false);

        assert_eq!(run("/foo", opts, &provider).await, redirect("/foo/"));
        assert_eq!(run("/foo.html", opts, &provider).await, serve("/foo.html"));
        assert_eq!(
            run("/foo/", opts, &provider).await,
            serve("/foo/index.html")
        );
        assert_eq!(run("/foo/bar", opts, &provider).await, Decision::Defer);
    }

    #[tokio::test]
    async fn test_clean_urls_scenarios() {
        let provider = tree();
        let opts = options(TrailingSlash::Unspecified, true);

        assert_eq!(
            run("/foo/bar", opts, &provider).await,
            serve("/foo/bar.html")
        );
        assert_eq!(
            run("/foo/bar.html", opts, &provider).await,
            redirect("/foo/bar")
        );
        // Index beats the `.html` sibling: /foo has both foo.html and
        // foo/index.html, and the directory signal wins.
        assert_eq!(run("/foo", opts, &provider).await, serve("/foo/index.html"));
    }

    #[tokio::test]
    async fn test_force_present_scenarios() {
        let provider = tree();
        let opts = options(TrailingSlash::ForcePresent, true);

        assert_eq!(run("/foo", opts, &provider).await, redirect("/foo/"));
        assert_eq!(
            run("/foo/bar/", opts, &provider).await,
            serve("/foo/bar.html")
        );
        assert_eq!(
            run("/foo/bar", opts, &provider).await,
            redirect("/foo/bar/")
        );
    }

    #[tokio::test]
    async fn test_force_absent_strips_slash() {
        let provider = tree();
        let opts = options(TrailingSlash::ForceAbsent, false);

        assert_eq!(run("/foo/", opts, &provider).await, redirect("/foo"));
        assert_eq!(run("/foo", opts, &provider).await, serve("/foo/index.html"));
    }

    #[tokio::test]
    async fn test_root_is_never_stripped() {
        let provider = MapProvider::new(&["/index.html"]);
        let opts = options(TrailingSlash::ForceAbsent, false);

        assert_eq!(run("/", opts, &provider).await, serve("/index.html"));
    }

    #[tokio::test]
    async fn test_exact_match_precedence() {
        // An extensionless file shadows both the directory index and the
        // clean-URL sibling.
        let provider = MapProvider::new(&["/foo", "/foo.html", "/foo/index.html"]);

        for clean_urls in [false, true] {
            let opts = options(TrailingSlash::Unspecified, clean_urls);
            assert_eq!(run("/foo", opts, &provider).await, serve("/foo"));
        }
    }

    #[tokio::test]
    async fn test_clean_url_redirect_strips_index() {
        let provider = tree();
        let opts = options(TrailingSlash::Unspecified, true);

        assert_eq!(
            run("/foo/index.html", opts, &provider).await,
            redirect("/foo")
        );
    }

    #[tokio::test]
    async fn test_clean_url_redirect_of_root_index() {
        let provider = MapProvider::new(&["/index.html"]);

        let opts = options(TrailingSlash::Unspecified, true);
        assert_eq!(run("/index.html", opts, &provider).await, redirect("/"));

        let opts = options(TrailingSlash::ForcePresent, true);
        assert_eq!(run("/index.html", opts, &provider).await, redirect("/"));
    }

    #[tokio::test]
    async fn test_extensionless_index_request_redirects_to_parent() {
        let provider = tree();
        let opts = options(TrailingSlash::Unspecified, true);

        assert_eq!(run("/foo/index", opts, &provider).await, redirect("/foo"));
    }

    #[tokio::test]
    async fn test_trailing_slash_without_policy_does_not_guess() {
        // Only /foo/bar.html exists; /foo/bar/ under Unspecified falls
        // through rather than guessing the sibling.
        let provider = MapProvider::new(&["/foo/bar.html"]);
        let opts = options(TrailingSlash::Unspecified, true);

        assert_eq!(run("/foo/bar/", opts, &provider).await, Decision::Defer);
    }

    #[tokio::test]
    async fn test_force_absent_clean_url_redirects_slashed_request() {
        let provider = MapProvider::new(&["/foo/bar.html"]);
        let opts = options(TrailingSlash::ForceAbsent, true);

        assert_eq!(
            run("/foo/bar/", opts, &provider).await,
            redirect("/foo/bar")
        );
    }

    #[tokio::test]
    async fn test_multi_slash_equivalence() {
        let provider = tree();
        for trailing_slash in [
            TrailingSlash::Unspecified,
            TrailingSlash::ForceAbsent,
            TrailingSlash::ForcePresent,
        ] {
            for clean_urls in [false, true] {
                let opts = options(trailing_slash, clean_urls);
                assert_eq!(
                    run("/foo////", opts, &provider).await,
                    run("/foo/", opts, &provider).await,
                );
            }
        }
    }

    #[tokio::test]
    async fn test_query_string_preserved_on_redirects() {
        let provider = tree();

        let opts = options(TrailingSlash::Unspecified, false);
        assert_eq!(
            run("/foo?a=1&b=2", opts, &provider).await,
            redirect("/foo/?a=1&b=2")
        );

        let opts = options(TrailingSlash::ForceAbsent, false);
        assert_eq!(
            run("/foo/?x=%2F", opts, &provider).await,
            redirect("/foo?x=%2F")
        );

        let opts = options(TrailingSlash::Unspecified, true);
        assert_eq!(
            run("/foo/bar.html?dl=1", opts, &provider).await,
            redirect("/foo/bar?dl=1")
        );
    }

    #[tokio::test]
    async fn test_no_redirect_chains() {
        // Property: re-resolving any emitted redirect target under the same
        // configuration never yields another redirect.
        let provider = MapProvider::new(&[
            "/index.html",
            "/foo.html",
            "/foo/index.html",
            "/foo/bar.html",
            "/docs/index.html",
            "/download",
        ]);
        let targets = [
            "/", "/index.html", "/index", "/foo", "/foo/", "/foo.html", "/foo/bar",
            "/foo/bar/", "/foo/bar.html", "/foo/index.html", "/foo/index", "/docs",
            "/docs/", "/docs/index.html", "/download", "/missing", "/missing/",
        ];

        for trailing_slash in [
            TrailingSlash::Unspecified,
            TrailingSlash::ForceAbsent,
            TrailingSlash::ForcePresent,
        ] {
            for clean_urls in [false, true] {
                let opts = options(trailing_slash, clean_urls);
                for target in targets {
                    let first = run(target, opts, &provider).await;
                    if let Decision::Redirect { location } = first {
                        let second =
                            resolve(&Request::parse(&location), &opts, &provider)
                                .await
                                .unwrap();
                        assert!(
                            !second.is_redirect(),
                            "redirect chain: {target} -> {location} -> {second:?} \
                             under {opts:?}",
                        );
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_probe_order_stops_at_first_hit() {
        // /foo.html exists as an exact path; with clean URLs off it is
        // served without probing further.
        let provider = tree();
        let opts = options(TrailingSlash::Unspecified, false);
        assert_eq!(run("/foo.html", opts, &provider).await, serve("/foo.html"));
    }

    #[tokio::test]
    async fn test_provider_error_aborts_resolution() {
        let request = Request::parse("/foo");
        let opts = options(TrailingSlash::Unspecified, false);
        let result = resolve(&request, &opts, &FaultyProvider).await;

        assert!(matches!(result, Err(ResolveError::Provider(_))));
    }

    #[tokio::test]
    async fn test_mount_root_addressed_without_slash() {
        // The mount layer hands the engine an empty pathname when a mount
        // prefix is hit with no trailing slash; the index redirect must
        // still canonicalize toward "/".
        let provider = MapProvider::new(&["/index.html"]);
        let request = Request::from_parts("", "");

        let opts = options(TrailingSlash::Unspecified, false);
        let decision = resolve(&request, &opts, &provider).await.unwrap();
        assert_eq!(decision, redirect("/"));

        let opts = options(TrailingSlash::ForceAbsent, false);
        let decision = resolve(&request, &opts, &provider).await.unwrap();
        assert_eq!(decision, serve("/index.html"));
    }
}
