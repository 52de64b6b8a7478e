//! Event types for the Noor event system
//!
//! Provides shared event definitions and the EventBus used by the session
//! controller to notify a presentation layer of state changes.

mod playback_types;

pub use playback_types::{PlaybackState, SessionMode};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Noor event types
///
/// Events are broadcast via EventBus and can be serialized for a UI bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NoorEvent {
    /// Session view state changed
    ModeChanged {
        from: SessionMode,
        to: SessionMode,
        timestamp: DateTime<Utc>,
    },

    /// A chapter became the current chapter
    ChapterSelected {
        chapter: u16,
        timestamp: DateTime<Utc>,
    },

    /// Chapter text and commentary were committed to the session cache
    ChapterDetailLoaded {
        chapter: u16,
        /// Number of verses in the loaded detail
        verses: usize,
        timestamp: DateTime<Utc>,
    },

    /// A fetch completed after a newer request was issued and was dropped
    StaleResponseDiscarded {
        /// Chapter the stale response was for (0 for search responses)
        chapter: u16,
        /// Token of the stale request
        token: u64,
        /// Latest token issued at the time of completion
        latest: u64,
        timestamp: DateTime<Utc>,
    },

    /// Playback state changed (Playing ↔ Paused)
    PlaybackStateChanged {
        old_state: PlaybackState,
        new_state: PlaybackState,
        timestamp: DateTime<Utc>,
    },

    /// Audio handle was re-pointed to a new source
    AudioSourceChanged {
        url: String,
        timestamp: DateTime<Utc>,
    },

    /// Remote verse search finished and its results were committed
    SearchCompleted {
        query: String,
        hits: usize,
        timestamp: DateTime<Utc>,
    },
}

impl NoorEvent {
    /// Event type name, matching the serde tag
    pub fn event_type(&self) -> &'static str {
        match self {
            NoorEvent::ModeChanged { .. } => "ModeChanged",
            NoorEvent::ChapterSelected { .. } => "ChapterSelected",
            NoorEvent::ChapterDetailLoaded { .. } => "ChapterDetailLoaded",
            NoorEvent::StaleResponseDiscarded { .. } => "StaleResponseDiscarded",
            NoorEvent::PlaybackStateChanged { .. } => "PlaybackStateChanged",
            NoorEvent::AudioSourceChanged { .. } => "AudioSourceChanged",
            NoorEvent::SearchCompleted { .. } => "SearchCompleted",
        }
    }
}

/// Central event distribution bus
///
/// Uses tokio::broadcast internally:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Lagged message detection for slow subscribers
///
/// # Examples
///
/// ```
/// use noor_common::events::{EventBus, NoorEvent, PlaybackState};
///
/// let event_bus = EventBus::new(100);
/// let mut rx = event_bus.subscribe();
///
/// event_bus.emit_lossy(NoorEvent::PlaybackStateChanged {
///     old_state: PlaybackState::Paused,
///     new_state: PlaybackState::Playing,
///     timestamp: chrono::Utc::now(),
/// });
///
/// assert!(rx.try_recv().is_ok());
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NoorEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<NoorEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: NoorEvent,
    ) -> Result<usize, broadcast::error::SendError<NoorEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: NoorEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(100)
    }
}
