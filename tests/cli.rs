//! Tests that run the compiled `partition-upload` binary.
//!
//! Each run gets a scrubbed environment so credentials on the developer's
//! machine never reach the mock servers, and `RUST_LOG=off` keeps stderr to
//! the single outcome line.

mod common;

use common::{partition_api, partition_api_ok, received, s3_ok, sample_pdf, DOC_OBJECT_PATH};
use std::process::Output;
use tokio::process::Command;

const ENV_VARS: &[&str] = &[
    "UNSTRUCTURED_API_KEY",
    "UNSTRUCTURED_API_URL",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "PARTITION_UPLOAD_S3_ENDPOINT",
    "PARTITION_UPLOAD_VERBOSE",
    "PARTITION_UPLOAD_QUIET",
];

fn command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_partition-upload"));
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RUST_LOG", "off");
    cmd
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[tokio::test]
async fn missing_file_prints_error_json() {
    let out = command()
        .args(["/definitely/not/a/real/doc.pdf", "doc.pdf"])
        .output()
        .await
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty(), "stdout: {}", stdout(&out));

    let err = stderr(&out);
    let line = err.lines().last().unwrap_or_default();
    assert!(line.starts_with(r#"{"error": "#), "stderr: {err}");
    let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("doc.pdf"));
}

#[tokio::test]
async fn missing_arguments_is_usage_error() {
    let out = command().arg("only-one-arg").output().await.unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());
}

#[tokio::test]
async fn partition_failure_exits_one_without_upload() {
    let api = partition_api(401, r#"{"detail":"API key is invalid"}"#).await;
    let s3 = s3_ok().await;
    let pdf = sample_pdf();

    let out = command()
        .arg(pdf.path())
        .arg("doc.pdf")
        .env("UNSTRUCTURED_API_KEY", "bad-key")
        .env("UNSTRUCTURED_API_URL", api.uri())
        .env("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "example-secret")
        .env("PARTITION_UPLOAD_S3_ENDPOINT", s3.uri())
        .output()
        .await
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
    let parsed: serde_json::Value = serde_json::from_str(stderr(&out).trim()).unwrap();
    assert!(parsed["error"].as_str().unwrap().contains("API key is invalid"));
    assert!(received(&s3).await.is_empty());
}

#[tokio::test]
async fn success_prints_url_json() {
    let api = partition_api_ok().await;
    let s3 = s3_ok().await;
    let pdf = sample_pdf();

    let out = command()
        .arg(pdf.path())
        .arg("doc.pdf")
        .env("UNSTRUCTURED_API_KEY", "test-key")
        .env("UNSTRUCTURED_API_URL", api.uri())
        .env("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE")
        .env("AWS_SECRET_ACCESS_KEY", "example-secret")
        .env("PARTITION_UPLOAD_S3_ENDPOINT", s3.uri())
        .output()
        .await
        .unwrap();

    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        format!("{{\"output_s3_url\": \"{}{DOC_OBJECT_PATH}\"}}\n", s3.uri())
    );
    assert!(stderr(&out).is_empty(), "stderr: {}", stderr(&out));
    assert_eq!(received(&api).await.len(), 1);
    assert_eq!(received(&s3).await.len(), 1);
}
