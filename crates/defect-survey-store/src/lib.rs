//! Durable persistence for survey graphs.
//!
//! A finished scanning session is flattened into a [`ScanFile`] and encoded
//! to a self-describing, versioned byte stream by [`codec`]. Decoding
//! tolerates legacy payloads (stations without a stored name) and reports
//! version or corruption problems as typed errors: a malformed file is a
//! recoverable condition for the caller, never a crash.

mod codec;
mod error;
mod scan_file;

pub use codec::{decode, encode};
pub use error::{DecodeError, StoreError};
pub use scan_file::{ScanFile, CURRENT_ENCODING_VERSION};

use std::path::Path;

/// Encode a scan and write it to `path`.
pub fn write_scan(path: impl AsRef<Path>, scan: &ScanFile) -> Result<(), StoreError> {
    let bytes = encode(scan);
    std::fs::write(&path, bytes)?;
    log::info!("wrote scan to {}", path.as_ref().display());
    Ok(())
}

/// Read and decode a scan from `path`.
pub fn read_scan(path: impl AsRef<Path>) -> Result<ScanFile, StoreError> {
    let bytes = std::fs::read(&path)?;
    Ok(decode(&bytes)?)
}
