//! Shared error type for the chunkmill pipeline.

use thiserror::Error;

/// Errors surfaced by chunking, storage, and ledger operations.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Filesystem read/write failure.
    #[error("io error: {0}")]
    Io(String),

    /// The ledger table could not be read, parsed, or rewritten.
    ///
    /// Ledger failures are fatal to the current source: the table is
    /// rewritten whole on every record call, so a partially understood
    /// table cannot be patched safely.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// Serializing or deserializing a chunk record failed.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}
