//! Quran reading/listening session controller
//!
//! Owns the view state, current chapter, reciter choice and the single cached
//! chapter detail, and drives the audio adapter from those.
//!
//! ```text
//! Browse ──select──▶ SelectingAction ──read──────────────▶ Reading
//!   ▲                      │                                 │  ▲
//!   │                      └─listen─▶ SelectingReciter       │  │ toggle
//!   │                                        │ reciter       ▼  │
//!   └──────────── back to index ◀──────── Listening ◀────────────┘
//! ```
//!
//! Search hits open Reading directly from Browse.
//!
//! Every detail fetch takes a token from `latest_detail_request`. Changing
//! the current chapter or clearing the detail also advances it, so a fetch
//! that resolves after the user moved on is dropped instead of overwriting
//! the cache slot. No lock is held while a fetch is awaited.

use crate::audio::{AudioPlayer, AudioSink, UrlOpener};
use crate::content::{build_audio_url, QuranSource};
use crate::error::{Error, Result};
use crate::models::{Chapter, ChapterDetail, SearchHit};
use crate::reciters::Reciter;
use crate::search::{BrowseView, SearchOutcome, SearchState, VerseSearch};
use chrono::Utc;
use noor_common::events::{EventBus, NoorEvent, SessionMode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// View state
///
/// `Reading` and `Listening` are only reachable through transitions that set
/// a current chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Browse,
    SelectingAction { chapter: Chapter },
    SelectingReciter { chapter: Chapter },
    Reading,
    Listening,
}

impl ViewMode {
    pub fn kind(&self) -> SessionMode {
        match self {
            ViewMode::Browse => SessionMode::Browse,
            ViewMode::SelectingAction { .. } => SessionMode::SelectingAction,
            ViewMode::SelectingReciter { .. } => SessionMode::SelectingReciter,
            ViewMode::Reading => SessionMode::Reading,
            ViewMode::Listening => SessionMode::Listening,
        }
    }
}

/// How a request to show chapter text was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Detail for this chapter was already loaded; no fetch
    Cached,
    /// Fetched and committed
    Loaded,
    /// Fetch failed; the cache slot stays empty
    Unavailable,
    /// A newer intent superseded this fetch; result dropped
    Stale,
}

/// Point-in-time copy of the session for rendering
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub mode: ViewMode,
    pub current: Option<Chapter>,
    pub reciter: Reciter,
    pub detail: Option<ChapterDetail>,
    pub show_commentary: bool,
    pub catalog_loading: bool,
    pub detail_loading: bool,
    pub playing: bool,
    pub audio_source: Option<String>,
}

#[derive(Debug)]
struct SessionState {
    catalog: Vec<Chapter>,
    catalog_loading: bool,
    mode: ViewMode,
    current: Option<Chapter>,
    reciter: Reciter,
    /// Capacity-one cache keyed by chapter number
    detail: Option<ChapterDetail>,
    detail_loading: bool,
    show_commentary: bool,
}

impl SessionState {
    fn new() -> Self {
        Self {
            catalog: Vec::new(),
            catalog_loading: true,
            mode: ViewMode::Browse,
            current: None,
            reciter: Reciter::default_reciter(),
            detail: None,
            detail_loading: false,
            show_commentary: false,
        }
    }

    fn find_chapter(&self, number: u16) -> Option<Chapter> {
        self.catalog.iter().find(|c| c.number == number).cloned()
    }

    fn audio_url(&self) -> Option<String> {
        self.current
            .as_ref()
            .map(|c| build_audio_url(c.number, self.reciter.base_url))
    }
}

/// Detail fetch dispatched under the state lock, awaited outside it
struct PendingDetail {
    token: u64,
    chapter: u16,
}

/// Session controller for the Quran view
///
/// Created at view mount; dropping it (or calling [`shutdown`](Self::shutdown))
/// stops audio.
pub struct QuranSession {
    source: Arc<dyn QuranSource>,
    state: RwLock<SessionState>,
    audio: Mutex<AudioPlayer>,
    search: VerseSearch,
    latest_detail_request: AtomicU64,
    events: EventBus,
}

impl QuranSession {
    pub fn new(source: Arc<dyn QuranSource>, sink: Box<dyn AudioSink>, events: EventBus) -> Self {
        Self {
            search: VerseSearch::new(Arc::clone(&source), events.clone()),
            source,
            state: RwLock::new(SessionState::new()),
            audio: Mutex::new(AudioPlayer::new(sink).with_events(events.clone())),
            latest_detail_request: AtomicU64::new(0),
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Fetch the chapter catalog; returns the number of chapters
    ///
    /// Zero means the catalog is unavailable.
    pub async fn load_catalog(&self) -> usize {
        let chapters = self.source.list_chapters().await;
        let count = chapters.len();

        let mut state = self.state.write().await;
        state.catalog = chapters;
        state.catalog_loading = false;
        if count == 0 {
            warn!("Chapter catalog unavailable");
        } else {
            info!(count, "Chapter catalog loaded");
        }
        count
    }

    pub async fn catalog(&self) -> Vec<Chapter> {
        self.state.read().await.catalog.clone()
    }

    pub async fn mode(&self) -> ViewMode {
        self.state.read().await.mode.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        let audio = self.audio.lock().await;
        SessionSnapshot {
            mode: state.mode.clone(),
            current: state.current.clone(),
            reciter: state.reciter,
            detail: state.detail.clone(),
            show_commentary: state.show_commentary,
            catalog_loading: state.catalog_loading,
            detail_loading: state.detail_loading,
            playing: audio.is_playing(),
            audio_source: audio.source().map(str::to_string),
        }
    }

    // ------------------------------------------------------------------
    // Selection flow
    // ------------------------------------------------------------------

    /// Tap a chapter in the index: offer "read" or "listen"
    pub async fn select_chapter(&self, number: u16) -> Result<()> {
        let mut state = self.state.write().await;
        if state.mode != ViewMode::Browse {
            return Err(invalid("select a chapter", &state.mode));
        }
        let chapter = state
            .find_chapter(number)
            .ok_or(Error::ChapterNotFound(number))?;
        self.set_mode(&mut state, ViewMode::SelectingAction { chapter });
        Ok(())
    }

    /// Dismiss the action or reciter choice
    pub async fn cancel_selection(&self) -> Result<()> {
        let mut state = self.state.write().await;
        match state.mode.kind() {
            SessionMode::SelectingAction | SessionMode::SelectingReciter => {
                self.set_mode(&mut state, ViewMode::Browse);
                Ok(())
            }
            mode => Err(Error::InvalidTransition {
                action: "cancel a selection",
                mode,
            }),
        }
    }

    /// "Read" in the action choice
    pub async fn choose_read(&self) -> Result<DetailOutcome> {
        let pending = {
            let mut state = self.state.write().await;
            let chapter = match &state.mode {
                ViewMode::SelectingAction { chapter } => chapter.clone(),
                _ => return Err(invalid("start reading", &state.mode)),
            };
            self.enter_reading(&mut state, chapter).await
        };
        Ok(self.finish_detail(pending).await)
    }

    /// "Listen" in the action choice: show the reciter catalog
    pub async fn choose_listen(&self) -> Result<()> {
        let mut state = self.state.write().await;
        let chapter = match &state.mode {
            ViewMode::SelectingAction { chapter } => chapter.clone(),
            _ => return Err(invalid("choose listening", &state.mode)),
        };
        self.set_mode(&mut state, ViewMode::SelectingReciter { chapter });
        Ok(())
    }

    /// Pick a reciter and start listening
    ///
    /// Drops any loaded detail and starts playback.
    pub async fn choose_reciter(&self, reciter_id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let chapter = match &state.mode {
            ViewMode::SelectingReciter { chapter } => chapter.clone(),
            _ => return Err(invalid("choose a reciter", &state.mode)),
        };
        let reciter = Reciter::find(reciter_id)
            .ok_or_else(|| Error::UnknownReciter(reciter_id.to_string()))?;

        state.reciter = reciter;
        self.set_current(&mut state, chapter);
        self.invalidate_detail(&mut state);
        state.show_commentary = false;
        self.set_mode(&mut state, ViewMode::Listening);

        if let Some(url) = state.audio_url() {
            info!(reciter = reciter.id, url = %url, "Starting playback");
            self.audio.lock().await.point_to(&url, true);
        }
        Ok(())
    }

    /// Open a search hit's chapter straight into reading
    ///
    /// Works without a loaded catalog: the hit's own chapter reference is
    /// used when the catalog has no entry for it.
    pub async fn read_search_hit(&self, hit: &SearchHit) -> Result<DetailOutcome> {
        let pending = {
            let mut state = self.state.write().await;
            if state.mode != ViewMode::Browse {
                return Err(invalid("open a search result", &state.mode));
            }
            let chapter = state
                .find_chapter(hit.chapter.number)
                .unwrap_or_else(|| Chapter::from(&hit.chapter));
            self.enter_reading(&mut state, chapter).await
        };
        Ok(self.finish_detail(pending).await)
    }

    /// Open a chapter straight into reading, skipping the action choice
    pub async fn read_chapter(&self, number: u16) -> Result<DetailOutcome> {
        let pending = {
            let mut state = self.state.write().await;
            if state.mode != ViewMode::Browse {
                return Err(invalid("open a chapter", &state.mode));
            }
            let chapter = state
                .find_chapter(number)
                .ok_or(Error::ChapterNotFound(number))?;
            self.enter_reading(&mut state, chapter).await
        };
        Ok(self.finish_detail(pending).await)
    }

    /// Flip between reading and listening for the current chapter
    ///
    /// Returns the detail outcome when switching into reading, `None` when
    /// switching to listening.
    pub async fn toggle_mode(&self) -> Result<Option<DetailOutcome>> {
        let pending = {
            let mut state = self.state.write().await;
            match (state.mode.kind(), state.current.clone()) {
                (SessionMode::Reading, Some(_)) => {
                    self.set_mode(&mut state, ViewMode::Listening);
                    self.sync_audio(&state).await;
                    return Ok(None);
                }
                (SessionMode::Listening, Some(chapter)) => {
                    self.enter_reading(&mut state, chapter).await
                }
                (mode, _) => {
                    return Err(Error::InvalidTransition {
                        action: "toggle reading mode",
                        mode,
                    })
                }
            }
        };
        Ok(Some(self.finish_detail(pending).await))
    }

    /// Return to the index, keeping chapter, reciter and cached detail
    pub async fn back_to_index(&self) -> Result<()> {
        let mut state = self.state.write().await;
        match state.mode.kind() {
            SessionMode::Reading | SessionMode::Listening => {
                self.set_mode(&mut state, ViewMode::Browse);
                self.sync_audio(&state).await;
                Ok(())
            }
            mode => Err(Error::InvalidTransition {
                action: "go back to the index",
                mode,
            }),
        }
    }

    /// Change reciter; re-points audio unless reading
    pub async fn set_reciter(&self, reciter_id: &str) -> Result<()> {
        let reciter = Reciter::find(reciter_id)
            .ok_or_else(|| Error::UnknownReciter(reciter_id.to_string()))?;
        let mut state = self.state.write().await;
        state.reciter = reciter;
        debug!(reciter = reciter.id, "Reciter changed");
        self.sync_audio(&state).await;
        Ok(())
    }

    pub async fn toggle_commentary(&self) -> bool {
        let mut state = self.state.write().await;
        state.show_commentary = !state.show_commentary;
        state.show_commentary
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Play/pause; no-op without a current chapter
    pub async fn toggle_play(&self) -> bool {
        let state = self.state.read().await;
        let Some(url) = state.audio_url() else {
            debug!("Toggle play ignored: no chapter selected");
            return false;
        };

        let mut audio = self.audio.lock().await;
        if audio.source() != Some(url.as_str()) {
            audio.point_to(&url, false);
        }
        audio.toggle_play(true)
    }

    /// Audio handle reported natural end of track
    pub async fn on_track_ended(&self) {
        self.audio.lock().await.on_ended();
    }

    pub async fn current_audio_url(&self) -> Option<String> {
        self.state.read().await.audio_url()
    }

    /// Hand the current chapter's audio URL to an external opener
    pub async fn download_current(&self, opener: &dyn UrlOpener) -> Option<String> {
        let url = self.current_audio_url().await?;
        info!(url = %url, "Opening audio for download");
        opener.open(&url);
        Some(url)
    }

    /// Stop and detach audio
    pub async fn shutdown(&self) {
        self.audio.lock().await.release();
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub async fn set_search_query(&self, query: impl Into<String>) {
        self.search.set_query(query).await;
    }

    pub async fn submit_search(&self) -> SearchOutcome {
        self.search.submit().await
    }

    pub async fn clear_search(&self) {
        self.search.clear().await;
    }

    pub async fn search_state(&self) -> SearchState {
        self.search.snapshot().await
    }

    /// Index content: verse hits if present, otherwise filtered chapters
    pub async fn browse_view(&self) -> BrowseView {
        let catalog = self.catalog().await;
        self.search.view(&catalog).await
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn set_mode(&self, state: &mut SessionState, mode: ViewMode) {
        let from = state.mode.kind();
        let to = mode.kind();
        state.mode = mode;
        if from != to {
            info!(%from, %to, "Session mode changed");
            self.events.emit_lossy(NoorEvent::ModeChanged {
                from,
                to,
                timestamp: Utc::now(),
            });
        }
    }

    /// Make `chapter` current; a different chapter invalidates the cache
    fn set_current(&self, state: &mut SessionState, chapter: Chapter) {
        let changed = state.current.as_ref().map(|c| c.number) != Some(chapter.number);
        if changed {
            self.invalidate_detail(state);
            self.events.emit_lossy(NoorEvent::ChapterSelected {
                chapter: chapter.number,
                timestamp: Utc::now(),
            });
        }
        state.current = Some(chapter);
    }

    /// Empty the cache slot and orphan any in-flight fetch
    fn invalidate_detail(&self, state: &mut SessionState) {
        self.latest_detail_request.fetch_add(1, Ordering::SeqCst);
        state.detail = None;
        state.detail_loading = false;
    }

    async fn enter_reading(
        &self,
        state: &mut SessionState,
        chapter: Chapter,
    ) -> Option<PendingDetail> {
        let number = chapter.number;
        self.set_current(state, chapter);
        self.set_mode(state, ViewMode::Reading);
        self.audio.lock().await.pause();

        if state.detail.as_ref().map(|d| d.chapter) == Some(number) {
            debug!(chapter = number, "Chapter detail served from cache");
            return None;
        }

        let token = self.latest_detail_request.fetch_add(1, Ordering::SeqCst) + 1;
        state.detail_loading = true;
        debug!(chapter = number, token, "Requesting chapter detail");
        Some(PendingDetail {
            token,
            chapter: number,
        })
    }

    async fn finish_detail(&self, pending: Option<PendingDetail>) -> DetailOutcome {
        let Some(pending) = pending else {
            return DetailOutcome::Cached;
        };

        let detail = self.source.chapter_detail(pending.chapter).await;

        let mut state = self.state.write().await;
        let latest = self.latest_detail_request.load(Ordering::SeqCst);
        if pending.token != latest {
            warn!(
                chapter = pending.chapter,
                token = pending.token,
                latest,
                "Discarding stale chapter detail"
            );
            self.events.emit_lossy(NoorEvent::StaleResponseDiscarded {
                chapter: pending.chapter,
                token: pending.token,
                latest,
                timestamp: Utc::now(),
            });
            return DetailOutcome::Stale;
        }

        state.detail_loading = false;
        match detail {
            Some(detail) => {
                self.events.emit_lossy(NoorEvent::ChapterDetailLoaded {
                    chapter: detail.chapter,
                    verses: detail.len(),
                    timestamp: Utc::now(),
                });
                state.detail = Some(detail);
                DetailOutcome::Loaded
            }
            None => DetailOutcome::Unavailable,
        }
    }

    /// Point audio at the current (chapter, reciter) unless reading
    async fn sync_audio(&self, state: &SessionState) {
        if state.mode == ViewMode::Reading {
            return;
        }
        if let Some(url) = state.audio_url() {
            let mut audio = self.audio.lock().await;
            let resume = audio.is_playing();
            audio.point_to(&url, resume);
        }
    }
}

fn invalid(action: &'static str, mode: &ViewMode) -> Error {
    Error::InvalidTransition {
        action,
        mode: mode.kind(),
    }
}
