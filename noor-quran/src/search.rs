//! Chapter filter and verse search
//!
//! Two paths share one text input:
//! - local filter over the loaded chapter catalog, recomputed synchronously
//!   on every keystroke
//! - remote verse search, run only on explicit submit; its results replace
//!   the filtered list until cleared

use crate::content::QuranSource;
use crate::models::{Chapter, SearchHit};
use chrono::Utc;
use noor_common::events::{EventBus, NoorEvent};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Whether `chapter` matches a filter query
///
/// Primary name: plain substring (no normalization). Transliterated name:
/// case-insensitive substring. Number: exact string equality.
pub fn chapter_matches(chapter: &Chapter, query: &str) -> bool {
    chapter.name.contains(query)
        || chapter
            .english_name
            .to_lowercase()
            .contains(&query.to_lowercase())
        || chapter.number.to_string() == query
}

/// Filter the catalog; an empty query returns everything
pub fn filter_chapters<'a>(catalog: &'a [Chapter], query: &str) -> Vec<&'a Chapter> {
    if query.is_empty() {
        return catalog.iter().collect();
    }
    catalog.iter().filter(|c| chapter_matches(c, query)).collect()
}

/// What the index screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseView {
    /// Filtered chapter list
    Chapters(Vec<Chapter>),
    /// Remote verse search results
    Verses(Vec<SearchHit>),
}

/// Search input and remote results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub hits: Vec<SearchHit>,
    /// Remote search in flight
    pub pending: bool,
    /// A remote search completed; `hits` replaces the filter until cleared,
    /// even when empty
    pub submitted: bool,
}

/// Result of a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query was blank after trimming; nothing was sent
    Skipped,
    /// Results committed
    Completed(usize),
    /// A newer submit or clear happened first; results dropped
    Stale,
}

/// Verse search state with stale-response guard
pub struct VerseSearch {
    source: Arc<dyn QuranSource>,
    state: RwLock<SearchState>,
    latest_request: AtomicU64,
    events: EventBus,
}

impl VerseSearch {
    pub fn new(source: Arc<dyn QuranSource>, events: EventBus) -> Self {
        Self {
            source,
            state: RwLock::new(SearchState::default()),
            latest_request: AtomicU64::new(0),
            events,
        }
    }

    pub async fn snapshot(&self) -> SearchState {
        self.state.read().await.clone()
    }

    pub async fn query(&self) -> String {
        self.state.read().await.query.clone()
    }

    /// Update the input text
    ///
    /// Emptying the input also drops remote results and any pending search.
    pub async fn set_query(&self, query: impl Into<String>) {
        let mut state = self.state.write().await;
        state.query = query.into();
        if state.query.is_empty() {
            self.latest_request.fetch_add(1, Ordering::SeqCst);
            state.hits.clear();
            state.pending = false;
            state.submitted = false;
        }
    }

    /// Run remote search for the current (trimmed) query
    pub async fn submit(&self) -> SearchOutcome {
        let (token, query) = {
            let mut state = self.state.write().await;
            let query = state.query.trim().to_string();
            if query.is_empty() {
                return SearchOutcome::Skipped;
            }
            state.pending = true;
            (self.latest_request.fetch_add(1, Ordering::SeqCst) + 1, query)
        };

        debug!(query = %query, token, "Submitting verse search");
        let hits = self.source.search_verses(&query).await;

        let mut state = self.state.write().await;
        let latest = self.latest_request.load(Ordering::SeqCst);
        if token != latest {
            warn!(query = %query, token, latest, "Discarding stale search response");
            self.events.emit_lossy(NoorEvent::StaleResponseDiscarded {
                chapter: 0,
                token,
                latest,
                timestamp: Utc::now(),
            });
            return SearchOutcome::Stale;
        }

        let count = hits.len();
        state.hits = hits;
        state.pending = false;
        state.submitted = true;
        self.events.emit_lossy(NoorEvent::SearchCompleted {
            query,
            hits: count,
            timestamp: Utc::now(),
        });
        SearchOutcome::Completed(count)
    }

    /// Reset query and results together
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        self.latest_request.fetch_add(1, Ordering::SeqCst);
        *state = SearchState::default();
    }

    /// Remote results after a completed search, otherwise the filtered catalog
    pub async fn view(&self, catalog: &[Chapter]) -> BrowseView {
        let state = self.state.read().await;
        if state.submitted {
            return BrowseView::Verses(state.hits.clone());
        }
        BrowseView::Chapters(
            filter_chapters(catalog, &state.query)
                .into_iter()
                .cloned()
                .collect(),
        )
    }
}
