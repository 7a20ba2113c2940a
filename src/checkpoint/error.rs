//! Checkpoint error types.

use thiserror::Error;

/// Errors that can occur while snapshotting or restoring engine state.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Encoding to JSON or binary failed
    #[error("Checkpoint encoding failed: {0}")]
    EncodingFailed(String),

    /// Decoding from JSON or binary failed
    #[error("Checkpoint decoding failed: {0}")]
    DecodingFailed(String),

    /// Snapshot format version is not supported by this build
    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Snapshot does not fit the engine's program
    #[error("Checkpoint rejected: {0}")]
    Rejected(String),
}
