//! Error types for shelfscan.

use thiserror::Error;

/// Errors raised while building or configuring a pipeline.
///
/// The per-frame stages never fail: detector errors and malformed detections
/// are absorbed as "no new information this frame".
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
