//! Request target normalization.
//!
//! # Responsibilities
//! - Split a raw request target into pathname and query string
//! - Collapse runs of repeated slashes in the pathname
//! - Small string helpers shared by the resolution engine
//!
//! # Design Decisions
//! - No percent-decoding: paths are preserved byte for byte, so
//!   unicode-bearing targets survive untouched
//! - Pure functions, no failure modes: an unsplittable target is simply a
//!   pathname with an empty query

/// Split a raw request target into `(pathname, search)`.
///
/// `search` includes the leading `?`, or is empty when the target carries no
/// query. Runs of two or more `/` in the pathname collapse to a single `/`.
pub fn normalize(raw_target: &str) -> (String, String) {
    let (path, search) = match raw_target.find('?') {
        Some(idx) => (&raw_target[..idx], &raw_target[idx..]),
        None => (raw_target, ""),
    };
    (collapse_slashes(path), search.to_string())
}

/// Collapse every run of consecutive `/` characters into one.
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_was_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_was_slash {
                out.push('/');
            }
            prev_was_slash = true;
        } else {
            out.push(ch);
            prev_was_slash = false;
        }
    }
    out
}

/// Strip at most one trailing `/`.
///
/// The root path collapses to the empty string; callers that build redirect
/// locations are responsible for normalizing empty back to `/`.
pub fn remove_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}
