//! Audio playback adapter
//!
//! Wraps the single platform audio output handle. The handle is bound to at
//! most one (chapter, reciter) URL at a time; re-pointing stops the old
//! source before loading the new one so two streams never overlap.
//!
//! Playback failures (unsupported format, autoplay blocked) are the sink's
//! business: it logs them and the adapter carries on.

use chrono::Utc;
use noor_common::events::{EventBus, NoorEvent, PlaybackState};
use tracing::{debug, info};

/// Platform audio output handle
pub trait AudioSink: Send {
    /// Bind the handle to a new source URL
    fn load(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and detach the current source
    fn stop(&mut self);
}

/// External open/download capability (browser tab, download manager, ...)
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Owns the audio handle for one session
pub struct AudioPlayer {
    sink: Box<dyn AudioSink>,
    source: Option<String>,
    playing: bool,
    events: Option<EventBus>,
}

impl AudioPlayer {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            source: None,
            playing: false,
            events: None,
        }
    }

    /// Emit playback events on `bus`
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Bind to `url`, then play if `resume` is set
    ///
    /// Pointing at the current source keeps it loaded and only applies
    /// `resume`.
    pub fn point_to(&mut self, url: &str, resume: bool) {
        if self.source.as_deref() == Some(url) {
            if resume && !self.playing {
                self.sink.play();
                self.set_playing(true);
            }
            return;
        }

        if self.source.is_some() {
            self.sink.stop();
        }
        self.sink.load(url);
        self.source = Some(url.to_string());
        info!(url = %url, resume, "Audio source changed");
        self.emit(NoorEvent::AudioSourceChanged {
            url: url.to_string(),
            timestamp: Utc::now(),
        });

        if resume {
            self.sink.play();
        }
        self.set_playing(resume);
    }

    /// Flip play/pause
    ///
    /// No-op (returns `false`) without a selected chapter or bound source.
    pub fn toggle_play(&mut self, has_chapter: bool) -> bool {
        if !has_chapter || self.source.is_none() {
            debug!("Toggle play ignored: nothing to play");
            return false;
        }

        if self.playing {
            self.sink.pause();
        } else {
            self.sink.play();
        }
        self.set_playing(!self.playing);
        self.playing
    }

    pub fn pause(&mut self) {
        if self.playing {
            self.sink.pause();
            self.set_playing(false);
        }
    }

    /// Natural end of track; there is no auto-advance
    pub fn on_ended(&mut self) {
        debug!(source = ?self.source, "Track ended");
        self.set_playing(false);
    }

    /// Stop and detach the source
    pub fn release(&mut self) {
        if self.source.take().is_some() {
            self.sink.stop();
        }
        self.set_playing(false);
    }

    fn set_playing(&mut self, playing: bool) {
        if self.playing == playing {
            return;
        }
        let old_state = PlaybackState::from_playing(self.playing);
        self.playing = playing;
        self.emit(NoorEvent::PlaybackStateChanged {
            old_state,
            new_state: PlaybackState::from_playing(playing),
            timestamp: Utc::now(),
        });
    }

    fn emit(&self, event: NoorEvent) {
        if let Some(bus) = &self.events {
            bus.emit_lossy(event);
        }
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.release();
    }
}
