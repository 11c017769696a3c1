use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors reported by the rich API. The `try_*` wrappers collapse all of
/// these into a boolean and log the detail instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("file is too short to contain a salt")]
    MissingSalt,

    #[error("ciphertext length {0} is not a positive multiple of the cipher block size")]
    BlockSize(u64),

    #[error("invalid padding; wrong password or corrupted data")]
    Padding,

    #[error("OS random generator unavailable")]
    Rng,

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors from a [`ValueCodec`](crate::codec::ValueCodec) implementation.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to serialize value: {0}")]
    Serialize(String),

    #[error("failed to deserialize value: {0}")]
    Deserialize(String),
}
