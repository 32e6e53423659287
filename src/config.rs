//! Configuration types for a partition-and-upload run.
//!
//! Everything a run needs is gathered into one [`PipelineConfig`] at start-up
//! and handed down to each stage. Nothing is read from the environment after
//! that point, so a config built in a test behaves exactly like one built by
//! the CLI.
//!
//! [`PartitionOptions`] and the storage defaults are fixed: the bucket,
//! region, and VLM settings are part of the tool's contract with the
//! downstream consumers of the uploaded JSON.

use crate::error::PipelineError;
use serde::Serialize;
use std::fmt;

/// Default base URL of the hosted partitioning API.
pub const DEFAULT_API_URL: &str = "https://api.unstructuredapp.io";

/// Bucket that receives every uploaded element file.
pub const DEFAULT_BUCKET: &str = "demo-unstructured-io";

/// Region of [`DEFAULT_BUCKET`].
pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment variable holding the partitioning API key.
pub const ENV_API_KEY: &str = "UNSTRUCTURED_API_KEY";
/// Environment variable overriding [`DEFAULT_API_URL`].
pub const ENV_API_URL: &str = "UNSTRUCTURED_API_URL";
/// Environment variable holding the S3 access key id.
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable holding the S3 secret access key.
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Environment variable pointing uploads at an S3-compatible endpoint.
pub const ENV_S3_ENDPOINT: &str = "PARTITION_UPLOAD_S3_ENDPOINT";

// ── Partition options ────────────────────────────────────────────────────

/// Partitioning strategy understood by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Let the service pick per document.
    Auto,
    /// Rule-based text extraction only.
    Fast,
    /// Layout model plus OCR.
    HiRes,
    /// OCR without layout detection.
    OcrOnly,
    /// Vision-language model reads each page. (default)
    #[default]
    Vlm,
}

impl Strategy {
    /// Wire value sent in the `strategy` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Fast => "fast",
            Strategy::HiRes => "hi_res",
            Strategy::OcrOnly => "ocr_only",
            Strategy::Vlm => "vlm",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing options sent with every partition request.
///
/// `Default` yields the constants the tool always uses: VLM strategy with
/// `gpt-4o` from `openai`, English, server-side PDF splitting with partial
/// failures allowed and 15 pages in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionOptions {
    pub strategy: Strategy,
    pub vlm_model: String,
    pub vlm_model_provider: String,
    /// Document languages, in priority order.
    pub languages: Vec<String>,
    pub split_pdf_page: bool,
    /// When set, a response with some failed page batches still counts as
    /// success.
    pub split_pdf_allow_failed: bool,
    pub split_pdf_concurrency_level: u32,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Vlm,
            vlm_model: "gpt-4o".to_string(),
            vlm_model_provider: "openai".to_string(),
            languages: vec!["eng".to_string()],
            split_pdf_page: true,
            split_pdf_allow_failed: true,
            split_pdf_concurrency_level: 15,
        }
    }
}

impl PartitionOptions {
    /// Flatten the options into multipart text fields, in a stable order.
    ///
    /// List values repeat the field name once per item.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("strategy", self.strategy.as_str().to_string()),
            ("vlm_model", self.vlm_model.clone()),
            ("vlm_model_provider", self.vlm_model_provider.clone()),
        ];
        fields.extend(self.languages.iter().map(|l| ("languages", l.clone())));
        fields.push(("split_pdf_page", self.split_pdf_page.to_string()));
        fields.push(("split_pdf_allow_failed", self.split_pdf_allow_failed.to_string()));
        fields.push((
            "split_pdf_concurrency_level",
            self.split_pdf_concurrency_level.to_string(),
        ));
        fields
    }
}

// ── Storage ──────────────────────────────────────────────────────────────

/// Where and how uploads are written.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// S3-compatible endpoint (MinIO, localstack). `None` means AWS.
    pub endpoint: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            region: DEFAULT_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
        }
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl StorageConfig {
    /// Public URL of `key` in this bucket.
    ///
    /// AWS buckets use the virtual-hosted form; custom endpoints are
    /// addressed path-style, the same way uploads reach them.
    pub fn public_url(&self, key: &str) -> String {
        match self.endpoint.as_deref() {
            Some(endpoint) => format!(
                "{}/{}/{}",
                endpoint.trim_end_matches('/'),
                self.bucket,
                key
            ),
            None => format!("https://{}.s3.amazonaws.com/{}", self.bucket, key),
        }
    }
}

// ── Pipeline config ──────────────────────────────────────────────────────

/// Configuration for one partition-and-upload run.
///
/// Built via [`PipelineConfig::builder()`], [`PipelineConfig::from_env()`],
/// or [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use partition_upload::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .api_key("my-key")
///     .credentials("AKIA...", "secret")
///     .build()
///     .unwrap();
/// assert_eq!(config.storage.bucket, "demo-unstructured-io");
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Partitioning API key. When absent the request goes out without one
    /// and the service rejects it.
    pub api_key: Option<String>,

    /// Base URL of the partitioning API. Default: [`DEFAULT_API_URL`].
    pub api_url: String,

    /// Fixed processing options.
    pub options: PartitionOptions,

    /// Upload destination and credentials.
    pub storage: StorageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            options: PartitionOptions::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("options", &self.options)
            .field("storage", &self.storage)
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }

    /// Read credentials and endpoint overrides from the process environment.
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), with an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let mut builder = Self::builder();
        if let Some(key) = get(ENV_API_KEY) {
            builder = builder.api_key(key);
        }
        if let Some(url) = get(ENV_API_URL) {
            builder = builder.api_url(url);
        }
        if let Some(id) = get(ENV_ACCESS_KEY_ID) {
            builder = builder.access_key_id(id);
        }
        if let Some(secret) = get(ENV_SECRET_ACCESS_KEY) {
            builder = builder.secret_access_key(secret);
        }
        if let Some(endpoint) = get(ENV_S3_ENDPOINT) {
            builder = builder.s3_endpoint(endpoint);
        }
        builder.build()
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    pub fn credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id(access_key_id)
            .secret_access_key(secret_access_key)
    }

    pub fn access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.config.storage.access_key_id = Some(access_key_id.into());
        self
    }

    pub fn secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.config.storage.secret_access_key = Some(secret_access_key.into());
        self
    }

    pub fn s3_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.storage.endpoint = Some(endpoint.into());
        self
    }

    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.config.storage.bucket = bucket.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, PipelineError> {
        let c = &self.config;
        if c.api_url.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "API URL must not be empty".into(),
            ));
        }
        if c.storage.bucket.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "Bucket name must not be empty".into(),
            ));
        }
        // Half a key pair would otherwise fall through to the default AWS
        // credential chain.
        match (&c.storage.access_key_id, &c.storage.secret_access_key) {
            (Some(_), None) => {
                return Err(PipelineError::InvalidConfig(format!(
                    "{ENV_ACCESS_KEY_ID} is set but {ENV_SECRET_ACCESS_KEY} is not"
                )));
            }
            (None, Some(_)) => {
                return Err(PipelineError::InvalidConfig(format!(
                    "{ENV_SECRET_ACCESS_KEY} is set but {ENV_ACCESS_KEY_ID} is not"
                )));
            }
            _ => {}
        }
        if c.options.split_pdf_concurrency_level == 0 {
            return Err(PipelineError::InvalidConfig(
                "Split concurrency level must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
