//! Error types for the partition-upload library.
//!
//! Every stage of the pipeline returns [`PipelineError`]. The variants fall
//! into three kinds, mirroring the three places a run can fail:
//!
//! * **Local I/O** — the input file is missing or unreadable
//!   ([`PipelineError::FileNotFound`], [`PipelineError::PermissionDenied`],
//!   [`PipelineError::FileRead`], [`PipelineError::InvalidInput`]).
//! * **Remote service** — anything that goes wrong while partitioning
//!   ([`PipelineError::Remote`]).
//! * **Upload** — anything that goes wrong while writing to object storage
//!   ([`PipelineError::Upload`], [`PipelineError::InvalidConfig`]).
//!
//! None of them is retried. The binary turns whichever one surfaces into a
//! single `{"error": "..."}` line, so the `Display` text is what users see.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the partition-upload library.
#[derive(Debug, Error)]
pub enum PipelineError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("No such file or directory: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied: '{}'", path.display())]
    PermissionDenied { path: PathBuf },

    /// The file was opened but reading it failed.
    #[error("Failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An argument was rejected before any I/O happened.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ── Remote service errors ─────────────────────────────────────────────
    /// The partitioning call failed: transport, authentication, bad status,
    /// or an undecodable response body.
    #[error("{message}")]
    Remote { message: String },

    // ── Serialisation errors ──────────────────────────────────────────────
    /// The element list could not be rendered as JSON.
    #[error("Failed to serialise elements: {0}")]
    Serialize(#[from] serde_json::Error),

    // ── Upload errors ─────────────────────────────────────────────────────
    /// The object-storage write failed.
    #[error("{message}")]
    Upload { message: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation or client construction failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Wrap any displayable failure from the partitioning call.
    pub fn remote(message: impl ToString) -> Self {
        Self::Remote {
            message: message.to_string(),
        }
    }

    /// Wrap any displayable failure from the object-storage write.
    pub fn upload(message: impl ToString) -> Self {
        Self::Upload {
            message: message.to_string(),
        }
    }

    /// `true` for errors raised before the partitioning service was contacted.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::PermissionDenied { .. }
                | Self::FileRead { .. }
                | Self::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_displays_bare_message() {
        let e = PipelineError::remote("API error occurred: Status 401");
        assert_eq!(e.to_string(), "API error occurred: Status 401");
    }

    #[test]
    fn upload_displays_bare_message() {
        let e = PipelineError::upload("Access Denied");
        assert_eq!(e.to_string(), "Access Denied");
    }

    #[test]
    fn file_not_found_mentions_path() {
        let e = PipelineError::FileNotFound {
            path: PathBuf::from("/nope/doc.pdf"),
        };
        assert!(e.to_string().contains("/nope/doc.pdf"), "got: {e}");
        assert!(e.is_local());
    }

    #[test]
    fn remote_and_upload_are_not_local() {
        assert!(!PipelineError::remote("x").is_local());
        assert!(!PipelineError::upload("x").is_local());
    }
}
