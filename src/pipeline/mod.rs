//! Pipeline stages for a partition-and-upload run.
//!
//! Each submodule implements exactly one step, and the network-facing steps
//! sit behind a trait so they can be stubbed independently.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ partition ──▶ serialize ──▶ upload
//! (file)    (HTTP API)    (JSON)        (S3)
//! ```
//!
//! 1. [`input`]     — read the local file into a [`input::SourceDocument`]
//! 2. [`partition`] — one multipart call to the partitioning service
//! 3. [`serialize`] — indented, order-preserving JSON
//! 4. [`upload`]    — one overwrite PUT to object storage

pub mod input;
pub mod partition;
pub mod serialize;
pub mod upload;
