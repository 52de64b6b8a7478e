//! Playback and session state type definitions
//!
//! Supporting types shared by event payloads.

use serde::{Deserialize, Serialize};

/// Playback state enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn from_playing(playing: bool) -> Self {
        if playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

/// Payload-free tag of the reader/listener view state
///
/// The full view state carries chapter data and lives in `noor-quran`;
/// events only need the tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum SessionMode {
    /// Chapter index, optionally filtered
    Browse,
    /// "Read or listen?" choice for a tapped chapter
    SelectingAction,
    /// Reciter choice before listening
    SelectingReciter,
    /// Verse text (and optional commentary) on screen
    Reading,
    /// Audio controls for the current chapter
    Listening,
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::Browse => write!(f, "Browse"),
            SessionMode::SelectingAction => write!(f, "SelectingAction"),
            SessionMode::SelectingReciter => write!(f, "SelectingReciter"),
            SessionMode::Reading => write!(f, "Reading"),
            SessionMode::Listening => write!(f, "Listening"),
        }
    }
}
