// ABOUTME: Error types for the CSV output destination
// ABOUTME: Open and write failures with the path involved

use std::io;
use std::path::PathBuf;

/// Errors writing the exported rows
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The output file could not be created
    #[error("Can not open output file {}", path.display())]
    Open {
        /// Requested output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing or flushing the output failed
    #[error("Can not write CSV output")]
    Write {
        /// Underlying I/O error
        #[from]
        source: io::Error,
    },
}
