//! Config file acquisition.
//!
//! Reads exactly one file. A missing file and an unreadable file are distinct
//! errors; nothing is created, written or locked.

use std::path::Path;

use tracing::debug;

use crate::error::Error;

/// Read the whole config file at `path`.
pub fn read_config_file(path: &Path) -> Result<Vec<u8>, Error> {
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), len = bytes.len(), "read config file");
            Ok(bytes)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(Error::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
