//! Filesystem-backed content provider.
//!
//! # Responsibilities
//! - Map URL paths onto a document root by segment join
//! - Reject traversal segments before touching the filesystem
//! - Report regular files only; directories and missing entries are absent
//!
//! # Design Decisions
//! - No percent-decoding: the URL path bytes are matched against file names
//!   as-is, mirroring the normalizer's byte-for-byte contract
//! - `NotFound`/`NotADirectory` are absence, every other I/O failure is a
//!   provider fault

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::content::provider::{ContentProvider, ProviderError};

/// Proof that a regular file exists, plus what the dispatcher needs to
/// stream it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub fs_path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

/// Serves existence lookups from a single document root directory.
#[derive(Debug, Clone)]
pub struct FsProvider {
    root: PathBuf,
}

impl FsProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a URL path onto the root. `None` when the path tries to escape
    /// the root via `..` segments.
    fn map_path(&self, path: &str) -> Option<PathBuf> {
        let mut fs_path = self.root.clone();
        for segment in path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return None,
                segment => fs_path.push(segment),
            }
        }
        Some(fs_path)
    }
}

impl ContentProvider for FsProvider {
    type Descriptor = FileDescriptor;

    async fn exists(&self, path: &str) -> Result<Option<FileDescriptor>, ProviderError> {
        // A trailing-slash path names a directory, never a file.
        if path.ends_with('/') {
            return Ok(None);
        }
        let Some(fs_path) = self.map_path(path) else {
            return Ok(None);
        };
        match tokio::fs::metadata(&fs_path).await {
            Ok(meta) if meta.is_file() => Ok(Some(FileDescriptor {
                fs_path,
                len: meta.len(),
                modified: meta.modified().ok(),
            })),
            Ok(_) => Ok(None),
            Err(err)
                if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) =>
            {
                Ok(None)
            }
            Err(err) => Err(ProviderError::Io(err)),
        }
    }
}
