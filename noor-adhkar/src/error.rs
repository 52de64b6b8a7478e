//! Error types for noor-adhkar

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Catalog JSON could not be parsed
    #[error("Catalog parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog parsed but an entry breaks a catalog rule
    #[error("Invalid catalog entry {id}: {reason}")]
    InvalidEntry { id: u32, reason: String },

    /// Tasbeeh cycle target of zero
    #[error("Invalid target: {0}")]
    InvalidTarget(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
