//! Filesystem access for the public directory
//!
//! Every request goes back to the filesystem; nothing is cached between
//! requests.

use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::http::mime::mime_type_for_path;

/// Metadata needed to describe a file in response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Content type derived from the file extension
    pub content_type: &'static str,

    /// Size in bytes
    pub len: u64,

    /// Modification time, if the platform reports one and it is not
    /// before the Unix epoch
    pub modified: Option<SystemTime>,
}

/// True only for existing regular files (directories do not count).
pub async fn path_exists(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

/// Stats a file without reading it.
pub async fn stat(path: &Path) -> io::Result<FileInfo> {
    let meta = tokio::fs::metadata(path).await?;

    Ok(FileInfo {
        content_type: mime_type_for_path(path),
        len: meta.len(),
        modified: meta
            .modified()
            .ok()
            .filter(|t| t.duration_since(UNIX_EPOCH).is_ok()),
    })
}

/// Reads the whole file into memory.
pub async fn read(path: &Path) -> io::Result<Vec<u8>> {
    tokio::fs::read(path).await
}
