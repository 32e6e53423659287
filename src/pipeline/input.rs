//! Input resolution: read the local file and pair it with its target name.
//!
//! The file is read fully into memory once. The handle lives only inside
//! [`read_source`], so it is closed on every return path before any network
//! call starts.

use crate::error::PipelineError;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

/// A local document ready to be sent for partitioning.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Name shown to the partitioning service and used as the output key prefix.
    pub file_name: String,
    /// Full file contents.
    pub content: Bytes,
}

impl SourceDocument {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Read `path` and label it `file_name`.
///
/// Only two things are checked locally: the name is non-empty and the file
/// can be opened and read. Everything else is left to the remote service.
pub async fn read_source(
    path: impl AsRef<Path>,
    file_name: &str,
) -> Result<SourceDocument, PipelineError> {
    let path = path.as_ref();

    if file_name.trim().is_empty() {
        return Err(PipelineError::InvalidInput(
            "target file name must not be empty".into(),
        ));
    }

    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| open_error(path.to_path_buf(), e))?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf)
        .await
        .map_err(|source| PipelineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Read {} bytes from {}", buf.len(), path.display());
    Ok(SourceDocument::new(file_name, buf))
}

fn open_error(path: PathBuf, e: std::io::Error) -> PipelineError {
    match e.kind() {
        ErrorKind::NotFound => PipelineError::FileNotFound { path },
        ErrorKind::PermissionDenied => PipelineError::PermissionDenied { path },
        _ => PipelineError::FileRead { path, source: e },
    }
}
