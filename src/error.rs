//! Error types for the genmerge container merge system.

use crate::types::RecordPath;
use std::path::PathBuf;
use thiserror::Error;

/// Container backend errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    RecordNotFound(RecordPath),

    #[error("Not a directory: {0}")]
    NotADirectory(RecordPath),

    #[error("Record already written: {0}")]
    DuplicateRecord(RecordPath),

    #[error("Container is read-only: {0}")]
    ReadOnly(PathBuf),

    #[error("Not a genmerge container: {0}")]
    BadMagic(PathBuf),

    #[error("Unsupported container format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    #[error("Container checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Failed to decode container payload: {0}")]
    Decode(String),

    #[error("Failed to encode container payload: {0}")]
    Encode(String),

    #[error("Container I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Merge driver errors. Fatal conditions only; recoverable conditions are
/// reported through logging and the merge report's warning counter.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("No input containers to merge")]
    NoInputs,

    #[error("Failed to create output container {path}: {source}")]
    OutputCreateFailed {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}
