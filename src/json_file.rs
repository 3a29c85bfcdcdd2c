//! Structured-record output: the full normalized record set as one JSON array.

use crate::error::Result;
use crate::normalize::Record;
use crate::util::write_atomic;
use std::path::Path;

/// Serialize records as a compact JSON array, in order.
pub fn records_to_json(records: &[Record]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(records)?)
}

/// Write the JSON array to `path` atomically. Returns the number of bytes written.
pub fn write_json_file(records: &[Record], path: &Path) -> Result<usize> {
    let bytes = records_to_json(records)?;
    write_atomic(path, &bytes)?;
    tracing::debug!("wrote {} records ({} bytes) to {}", records.len(), bytes.len(), path.display());
    Ok(bytes.len())
}
