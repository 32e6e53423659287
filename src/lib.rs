//! # partition-upload
//!
//! Partition a document with the Unstructured API and publish the extracted
//! elements as JSON in S3.
//!
//! ## Pipeline Overview
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Input      read the local file, pair it with its target name
//!  ├─ 2. Partition  one POST to /general/v0/general (VLM strategy, gpt-4o)
//!  ├─ 3. Serialize  indented JSON, element key order preserved
//!  ├─ 4. Upload     PUT s3://demo-unstructured-io/outputs/{name}-embeddings.json
//!  └─ 5. Report     {"output_s3_url": …} on stdout or {"error": …} on stderr
//! ```
//!
//! Every step runs once. There is no retry; the first error ends the run and
//! becomes the reported message.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use partition_upload::{process_file, PipelineConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads UNSTRUCTURED_API_KEY, AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY
//!     let config = PipelineConfig::from_env()?;
//!     let output = process_file("doc.pdf", "doc.pdf", &config).await?;
//!     println!("{}", output.output_s3_url);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `partition-upload` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod process;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PartitionOptions, PipelineConfig, PipelineConfigBuilder, StorageConfig, Strategy};
pub use error::PipelineError;
pub use outcome::Outcome;
pub use pipeline::input::SourceDocument;
pub use pipeline::partition::{Element, Partitioner, UnstructuredClient};
pub use pipeline::upload::{ObjectSink, ObjectStoreSink, UploadTarget};
pub use process::{process_file, process_sync, process_with, ProcessOutput};
