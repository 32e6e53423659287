//! Pipeline driver: read → partition → serialise → upload.
//!
//! [`process_file`] is the entry point the CLI uses; it builds the real
//! HTTP and S3 clients from a [`PipelineConfig`]. [`process_with`] runs the
//! same steps against caller-supplied [`Partitioner`] and [`ObjectSink`]
//! implementations, which is how the tests stub out the network.
//!
//! Steps run strictly one after another and the first error ends the run:
//! a missing file never reaches the API and a failed partition never
//! reaches storage.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::pipeline::input::read_source;
use crate::pipeline::partition::{Partitioner, UnstructuredClient};
use crate::pipeline::serialize;
use crate::pipeline::upload::{ObjectSink, ObjectStoreSink, UploadTarget};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutput {
    /// Public URL of the uploaded element file.
    pub output_s3_url: String,
    /// Object key the elements were written under.
    pub key: String,
    /// Number of elements the service returned.
    pub element_count: usize,
    /// Size of the uploaded JSON.
    pub uploaded_bytes: usize,
}

/// Partition `input` with the hosted API and upload the elements to S3.
///
/// # Arguments
/// * `input`     — Local file to partition
/// * `file_name` — Name sent to the API and used in the output key
/// * `config`    — Credentials, endpoints, and fixed options
///
/// # Errors
/// Returns the first [`PipelineError`] raised by any step.
pub async fn process_file(
    input: impl AsRef<Path>,
    file_name: &str,
    config: &PipelineConfig,
) -> Result<ProcessOutput, PipelineError> {
    let partitioner = UnstructuredClient::new(&config.api_url, config.api_key.clone())?;
    let sink = ObjectStoreSink::connect(&config.storage)?;
    process_with(input, file_name, config, &partitioner, &sink).await
}

/// Run the pipeline with explicit collaborators.
pub async fn process_with(
    input: impl AsRef<Path>,
    file_name: &str,
    config: &PipelineConfig,
    partitioner: &dyn Partitioner,
    sink: &dyn ObjectSink,
) -> Result<ProcessOutput, PipelineError> {
    let start = Instant::now();
    let input = input.as_ref();
    info!("Processing {} as '{}'", input.display(), file_name);

    // ── Step 1: Read input ───────────────────────────────────────────────
    let doc = read_source(input, file_name).await?;

    // ── Step 2: Partition ────────────────────────────────────────────────
    let elements = partitioner.partition(&doc, &config.options).await?;

    // ── Step 3: Serialise ────────────────────────────────────────────────
    let body = serialize::to_json(&elements)?;
    let uploaded_bytes = body.len();

    // ── Step 4: Upload ───────────────────────────────────────────────────
    let target = UploadTarget::for_file(&config.storage, &doc.file_name);
    sink.put(&target, body).await?;

    info!(
        "Uploaded {} elements to {} in {}ms",
        elements.len(),
        target.public_url(),
        start.elapsed().as_millis()
    );

    Ok(ProcessOutput {
        output_s3_url: target.public_url().to_string(),
        key: target.key,
        element_count: elements.len(),
        uploaded_bytes,
    })
}

/// Synchronous wrapper around [`process_file`].
///
/// Creates a current-thread tokio runtime internally.
pub fn process_sync(
    input: impl AsRef<Path>,
    file_name: &str,
    config: &PipelineConfig,
) -> Result<ProcessOutput, PipelineError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| PipelineError::InvalidConfig(format!("tokio runtime: {e}")))?
        .block_on(process_file(input, file_name, config))
}
