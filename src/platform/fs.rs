// LogLens - platform/fs.rs
//
// Small filesystem helpers for the command-line path. The HTTP path goes
// through platform::storage instead.

use crate::util::error::LogLensError;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Read a whole log file as raw bytes; decoding is the parser's job.
pub fn read_log_file(path: &Path) -> Result<Vec<u8>, LogLensError> {
    std::fs::read(path).map_err(|e| LogLensError::Io {
        path: path.to_path_buf(),
        operation: "read log file",
        source: e,
    })
}

/// Create (or truncate) an export destination, buffered.
pub fn create_export_file(path: &Path) -> Result<BufWriter<File>, LogLensError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| LogLensError::Io {
            path: path.to_path_buf(),
            operation: "create export file",
            source: e,
        })
}
