//! CLI binary for partition-upload.
//!
//! A thin shim over the library crate that maps arguments and environment
//! to `PipelineConfig`, runs one document, and prints the outcome line.

use anyhow::{Context, Result};
use clap::Parser;
use partition_upload::config::DEFAULT_API_URL;
use partition_upload::{process_file, Outcome, PipelineConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Partition a PDF and publish its elements
  partition-upload ./uploads/tmp-1234 report.pdf

  # Against a local S3-compatible store
  PARTITION_UPLOAD_S3_ENDPOINT=http://localhost:9000 partition-upload doc.pdf doc.pdf

OUTPUT:
  success (exit 0, stdout):  {"output_s3_url": "https://demo-unstructured-io.s3.amazonaws.com/outputs/<name>-embeddings.json"}
  failure (exit 1, stderr):  {"error": "<message>"}

PARTITION OPTIONS (fixed):
  strategy=vlm  vlm_model=gpt-4o  vlm_model_provider=openai  languages=eng
  split_pdf_page=true  split_pdf_allow_failed=true  split_pdf_concurrency_level=15

ENVIRONMENT VARIABLES:
  UNSTRUCTURED_API_KEY          Partitioning API key
  UNSTRUCTURED_API_URL          Override the partitioning API base URL
  AWS_ACCESS_KEY_ID             S3 access key id
  AWS_SECRET_ACCESS_KEY         S3 secret access key
  PARTITION_UPLOAD_S3_ENDPOINT  S3-compatible endpoint (path-style)
  RUST_LOG                      Log filter (logs go to stderr)
"#;

/// Partition a document with the Unstructured API and upload the elements to S3.
#[derive(Parser, Debug)]
#[command(
    name = "partition-upload",
    version,
    about = "Partition a document with the Unstructured API and upload the elements to S3",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local file to partition.
    input: PathBuf,

    /// File name sent to the API and used in the output key.
    file_name: String,

    /// Partitioning API key.
    #[arg(long, env = "UNSTRUCTURED_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Partitioning API base URL.
    #[arg(long, env = "UNSTRUCTURED_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// S3 access key id.
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    aws_access_key_id: Option<String>,

    /// S3 secret access key.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    aws_secret_access_key: Option<String>,

    /// S3-compatible endpoint, addressed path-style.
    #[arg(long, env = "PARTITION_UPLOAD_S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PARTITION_UPLOAD_VERBOSE")]
    verbose: bool,

    /// Suppress all logs except errors.
    #[arg(short, long, env = "PARTITION_UPLOAD_QUIET", conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // stdout carries the result line only; logs always go to stderr.
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let outcome = match build_config(&cli) {
        Ok(config) => Outcome::from(process_file(&cli.input, &cli.file_name, &config).await),
        Err(e) => Outcome::failure(format!("{e:#}")),
    };

    outcome.emit()
}

/// Map CLI args to `PipelineConfig`.
fn build_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder().api_url(&cli.api_url);

    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key);
    }

    if let Some(ref id) = cli.aws_access_key_id {
        builder = builder.access_key_id(id);
    }

    if let Some(ref secret) = cli.aws_secret_access_key {
        builder = builder.secret_access_key(secret);
    }

    if let Some(ref endpoint) = cli.s3_endpoint {
        builder = builder.s3_endpoint(endpoint);
    }

    builder.build().context("Failed to build configuration")
}
