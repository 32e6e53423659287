//! Element list → indented JSON.
//!
//! Output is two-space indented with `": "` between keys and values, and
//! each element keeps the key order it was received in, so the same
//! response always produces the same bytes.

use crate::error::PipelineError;
use crate::pipeline::partition::Element;
use bytes::Bytes;
use tracing::debug;

/// Render `elements` as an indented JSON array.
pub fn to_json(elements: &[Element]) -> Result<Bytes, PipelineError> {
    let json = serde_json::to_vec_pretty(elements)?;
    debug!(
        "Serialised {} elements → {} bytes",
        elements.len(),
        json.len()
    );
    Ok(Bytes::from(json))
}
