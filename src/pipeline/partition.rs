//! Remote partitioning: send the document to the Unstructured API.
//!
//! [`Partitioner`] is the seam between the pipeline and the network. The
//! production implementation, [`UnstructuredClient`], issues exactly one
//! multipart `POST` per document and waits for the full element list. There
//! is no retry and no timeout beyond reqwest's defaults; page splitting and
//! per-page concurrency happen on the service side, steered by
//! [`PartitionOptions`].
//!
//! Every failure, whether transport, HTTP status, or an unreadable body,
//! collapses into [`PipelineError::Remote`] with the underlying message.

use crate::config::PartitionOptions;
use crate::error::PipelineError;
use crate::pipeline::input::SourceDocument;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// One extracted unit of document content. The schema belongs to the
/// service; keys keep the order they arrived in.
pub type Element = Map<String, Value>;

/// Route of the partition endpoint, relative to the API base URL.
pub const PARTITION_PATH: &str = "/general/v0/general";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "unstructured-api-key";

/// Something that can turn a document into elements.
#[async_trait]
pub trait Partitioner: Send + Sync {
    /// Partition `doc` with `options`. Called at most once per run.
    async fn partition(
        &self,
        doc: &SourceDocument,
        options: &PartitionOptions,
    ) -> Result<Vec<Element>, PipelineError>;
}

/// HTTP client for the hosted partitioning API.
#[derive(Debug, Clone)]
pub struct UnstructuredClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl UnstructuredClient {
    /// Create a client for the API rooted at `api_url`.
    pub fn new(api_url: &str, api_key: Option<String>) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("partition-upload/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PipelineError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", api_url.trim_end_matches('/'), PARTITION_PATH),
            api_key,
        })
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_form(doc: &SourceDocument, options: &PartitionOptions) -> Form {
        let file = Part::bytes(doc.content.to_vec()).file_name(doc.file_name.clone());

        options
            .form_fields()
            .into_iter()
            .fold(Form::new().part("files", file), |form, (name, value)| {
                form.text(name, value)
            })
    }
}

#[async_trait]
impl Partitioner for UnstructuredClient {
    async fn partition(
        &self,
        doc: &SourceDocument,
        options: &PartitionOptions,
    ) -> Result<Vec<Element>, PipelineError> {
        info!(
            file_name = %doc.file_name,
            strategy = %options.strategy,
            "Partitioning document"
        );
        debug!(
            endpoint = %self.endpoint,
            bytes = doc.len(),
            concurrency = options.split_pdf_concurrency_level,
            "Sending partition request"
        );

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(Self::build_form(doc, options));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(PipelineError::remote)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(PipelineError::remote(format!("HTTP {status}: {body}")));
        }

        let elements: Vec<Element> = response.json().await.map_err(PipelineError::remote)?;

        info!(elements = elements.len(), "Partitioning complete");
        Ok(elements)
    }
}
