//! Outcome reporting: the one JSON line a run prints.
//!
//! A run ends in exactly one of two payloads:
//!
//! ```text
//! stdout, exit 0:  {"output_s3_url": "https://…/outputs/doc.pdf-embeddings.json"}
//! stderr, exit 1:  {"error": "No such file or directory: 'doc.pdf'"}
//! ```
//!
//! Separators are `", "` and `": "` so the line reads the same as the
//! payloads existing consumers already parse.

use crate::error::PipelineError;
use crate::process::ProcessOutput;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};
use std::process::ExitCode;

/// Final result of a run, as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Success { output_s3_url: String },
    Failure { error: String },
}

impl Outcome {
    pub fn success(url: impl Into<String>) -> Self {
        Self::Success {
            output_s3_url: url.into(),
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self::Failure {
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        }
    }

    /// Single-line JSON rendering, without a trailing newline.
    pub fn to_json_line(&self) -> String {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        // Two string fields cannot fail to serialise into a Vec.
        if self.serialize(&mut ser).is_err() {
            return String::from("{}");
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the line to `out` on success or `err` on failure.
    pub fn write_to<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> io::Result<()> {
        let line = self.to_json_line();
        match self {
            Outcome::Success { .. } => {
                writeln!(out, "{line}")?;
                out.flush()
            }
            Outcome::Failure { .. } => {
                writeln!(err, "{line}")?;
                err.flush()
            }
        }
    }

    /// Print to the process's stdout/stderr and return the exit code.
    pub fn emit(&self) -> ExitCode {
        let stdout = io::stdout();
        let stderr = io::stderr();
        // Nothing useful can be reported if the standard streams are gone.
        let _ = self.write_to(&mut stdout.lock(), &mut stderr.lock());
        self.exit_code()
    }
}

impl From<Result<ProcessOutput, PipelineError>> for Outcome {
    fn from(result: Result<ProcessOutput, PipelineError>) -> Self {
        match result {
            Ok(output) => Outcome::success(output.output_s3_url),
            Err(e) => Outcome::failure(e),
        }
    }
}

/// Compact JSON with a space after `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_line() {
        let o = Outcome::success(
            "https://demo-unstructured-io.s3.amazonaws.com/outputs/doc.pdf-embeddings.json",
        );
        assert_eq!(
            o.to_json_line(),
            r#"{"output_s3_url": "https://demo-unstructured-io.s3.amazonaws.com/outputs/doc.pdf-embeddings.json"}"#
        );
    }

    #[test]
    fn failure_line_escapes_message() {
        let o = Outcome::failure("HTTP 401 Unauthorized: {\"detail\":\"bad key\"}\n");
        let line = o.to_json_line();
        assert!(line.starts_with(r#"{"error": "HTTP 401"#), "got: {line}");
        assert!(!line.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(
            parsed["error"],
            "HTTP 401 Unauthorized: {\"detail\":\"bad key\"}\n"
        );
    }

    #[test]
    fn success_goes_to_stdout_only() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        Outcome::success("u").write_to(&mut out, &mut err).unwrap();
        assert_eq!(out, b"{\"output_s3_url\": \"u\"}\n");
        assert!(err.is_empty());
    }

    #[test]
    fn failure_goes_to_stderr_only() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        Outcome::failure("boom").write_to(&mut out, &mut err).unwrap();
        assert!(out.is_empty());
        assert_eq!(err, b"{\"error\": \"boom\"}\n");
    }

    #[test]
    fn from_result() {
        let ok: Outcome = Ok::<_, PipelineError>(ProcessOutput {
            output_s3_url: "u".into(),
            key: "outputs/x-embeddings.json".into(),
            element_count: 0,
            uploaded_bytes: 2,
        })
        .into();
        assert_eq!(ok, Outcome::success("u"));
        let err: Outcome = Err(PipelineError::upload("denied")).into();
        assert_eq!(err, Outcome::failure("denied"));
    }
}
