//! Shared helpers for the integration tests.
//!
//! The partitioning API and S3 are stood in for by `wiremock` servers. The
//! helpers here mount the mocks most tests need; tests with stricter
//! expectations mount their own.

#![allow(dead_code)]

use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Path the partitioning API serves.
pub const PARTITION_PATH: &str = "/general/v0/general";

/// Path of the `doc.pdf` element file on a path-style S3 endpoint.
pub const DOC_OBJECT_PATH: &str = "/demo-unstructured-io/outputs/doc.pdf-embeddings.json";

/// Element list returned by the mock partitioning API.
pub const ELEMENTS_JSON: &str = r#"[
  {"type": "Title", "element_id": "e1", "text": "Quarterly Report", "metadata": {"page_number": 1, "filename": "doc.pdf"}},
  {"type": "NarrativeText", "element_id": "e2", "text": "Revenue grew.", "metadata": {"page_number": 1, "filename": "doc.pdf"}}
]"#;

/// JSON reply with the given status.
pub fn json_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, "application/json")
}

/// S3's reply to a successful PUT.
pub fn put_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).insert_header("ETag", "\"d41d8cd98f00b204e9800998ecf8427e\"")
}

/// Partitioning API that answers every request with `status` and `body`.
pub async fn partition_api(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PARTITION_PATH))
        .respond_with(json_response(status, body))
        .mount(&server)
        .await;
    server
}

/// Partitioning API that always succeeds with [`ELEMENTS_JSON`].
pub async fn partition_api_ok() -> MockServer {
    partition_api(200, ELEMENTS_JSON).await
}

/// S3 endpoint accepting every PUT.
pub async fn s3_ok() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(put_ok())
        .mount(&server)
        .await;
    server
}

/// Everything `server` has received so far.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// How a text field appears in a `multipart/form-data` body.
pub fn form_field(name: &str, value: &str) -> String {
    format!("name=\"{name}\"\r\n\r\n{value}\r\n")
}

/// A small file standing in for an uploaded PDF.
pub fn sample_pdf() -> tempfile::NamedTempFile {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.write_all(b"%PDF-1.7\n%mock\n").unwrap();
    tmp
}
