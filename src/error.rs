use std::io;

use thiserror::Error;

/// Errors from the fallible edges of the crate (settings and scenario files).
/// Tab operations themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
