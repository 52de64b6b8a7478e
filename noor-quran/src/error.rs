//! Error types for noor-quran
//!
//! Remote failures never surface here: the content layer swallows them into
//! empty results. These errors describe caller mistakes, such as a gesture
//! that is not valid in the current view state.

use noor_common::events::SessionMode;
use thiserror::Error;

/// Main error type for noor-quran
#[derive(Error, Debug)]
pub enum Error {
    /// Chapter number is not in the loaded catalog
    #[error("Chapter not found: {0}")]
    ChapterNotFound(u16),

    /// Reciter id is not in the static catalog
    #[error("Unknown reciter: {0}")]
    UnknownReciter(String),

    /// Gesture is not available in the current view state
    #[error("Cannot {action} while in {mode} mode")]
    InvalidTransition {
        action: &'static str,
        mode: SessionMode,
    },
}

/// Result type for noor-quran operations
pub type Result<T> = std::result::Result<T, Error>;
