//! Quran content access
//!
//! HTTP client for the remote Quran content service (chapter catalog,
//! chapter text + commentary, full-text search) plus the pure audio URL
//! builder.
//!
//! The [`QuranSource`] trait is the boundary the session controller uses.
//! Its methods never fail: transport, status and parse errors are logged and
//! turned into an empty sequence or `None`. Callers that need the cause use
//! the `try_*` methods on [`AlQuranClient`].

use crate::models::{AnnotatedVerse, Chapter, ChapterDetail, SearchHit, Verse};
use async_trait::async_trait;
use noor_common::config::QuranConfig;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("noor/", env!("CARGO_PKG_VERSION"));
const AUDIO_EXTENSION: &str = "mp3";

/// Commentary used for a verse with no matching commentary entry
pub const COMMENTARY_PLACEHOLDER: &str = "لا يوجد تفسير";

/// Queries shorter than this (in characters) are never sent
pub const MIN_SEARCH_CHARS: usize = 2;

/// Content service errors
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status, or an envelope `code` other than 200
    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Response wrapper used by every endpoint: `{ code, status, data }`
#[derive(Debug, Deserialize)]
struct Envelope {
    code: u16,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: serde_json::Value,
}

/// One edition of one chapter; only the verses are used
#[derive(Debug, Deserialize)]
struct EditionChapter {
    ayahs: Vec<Verse>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(default)]
    matches: Vec<SearchHit>,
}

/// Source of Quran content consumed by the session controller
///
/// Empty / `None` means "unavailable", not "confirmed empty".
#[async_trait]
pub trait QuranSource: Send + Sync {
    /// Full chapter catalog in chapter order
    async fn list_chapters(&self) -> Vec<Chapter>;

    /// Chapter text merged with commentary; `None` if either fetch fails
    async fn chapter_detail(&self, chapter: u16) -> Option<ChapterDetail>;

    /// Verse full-text search; queries under [`MIN_SEARCH_CHARS`] return empty
    async fn search_verses(&self, query: &str) -> Vec<SearchHit>;
}

/// Build the audio file URL for a chapter under a reciter's base URL
///
/// `build_audio_url(7, "https://host/base/")` → `"https://host/base/007.mp3"`
pub fn build_audio_url(chapter: u16, reciter_base_url: &str) -> String {
    format!("{}{:03}.{}", reciter_base_url, chapter, AUDIO_EXTENSION)
}

/// Whether a query is long enough to be sent to remote search
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_SEARCH_CHARS
}

/// Pair verses with commentary by ordinal position
///
/// Missing or empty commentary entries become [`COMMENTARY_PLACEHOLDER`];
/// surplus commentary entries are ignored.
pub fn merge_commentary(chapter: u16, verses: Vec<Verse>, commentary: Vec<Verse>) -> ChapterDetail {
    if verses.len() != commentary.len() {
        tracing::debug!(
            chapter,
            verses = verses.len(),
            commentary = commentary.len(),
            "Verse and commentary counts differ"
        );
    }

    let mut commentary = commentary.into_iter();
    let verses = verses
        .into_iter()
        .map(|verse| {
            let commentary = commentary
                .next()
                .map(|c| c.text)
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| COMMENTARY_PLACEHOLDER.to_string());
            AnnotatedVerse { verse, commentary }
        })
        .collect();

    ChapterDetail { chapter, verses }
}

/// Client for the alquran.cloud-style REST API
pub struct AlQuranClient {
    http_client: reqwest::Client,
    base_url: Url,
    config: QuranConfig,
}

impl AlQuranClient {
    pub fn new(config: &QuranConfig) -> Result<Self, ContentError> {
        let base_url = Url::parse(&config.api_base_url)
            .map_err(|e| ContentError::Parse(format!("{}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ContentError::Parse(format!(
                "{} cannot be used as a base URL",
                config.api_base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ContentError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            config: config.clone(),
        })
    }

    /// Append percent-encoded path segments to the base URL
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, ContentError> {
        tracing::debug!(url = %url, "Querying Quran content service");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ContentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ContentError::Api(status.as_u16(), error_text));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))?;

        if envelope.code != 200 {
            return Err(ContentError::Api(
                envelope.code,
                envelope.status.unwrap_or_default(),
            ));
        }

        serde_json::from_value(envelope.data).map_err(|e| ContentError::Parse(e.to_string()))
    }

    pub async fn try_list_chapters(&self) -> Result<Vec<Chapter>, ContentError> {
        self.get_data(self.endpoint(&["surah"])).await
    }

    /// Fetch text and commentary concurrently and merge them
    pub async fn try_chapter_detail(&self, chapter: u16) -> Result<ChapterDetail, ContentError> {
        let number = chapter.to_string();
        let text_url = self.endpoint(&["surah", &number, &self.config.text_edition]);
        let commentary_url = self.endpoint(&["surah", &number, &self.config.commentary_edition]);

        let (text, commentary) = tokio::try_join!(
            self.get_data::<EditionChapter>(text_url),
            self.get_data::<EditionChapter>(commentary_url),
        )?;

        Ok(merge_commentary(chapter, text.ayahs, commentary.ayahs))
    }

    pub async fn try_search_verses(&self, query: &str) -> Result<Vec<SearchHit>, ContentError> {
        if !is_searchable(query) {
            return Ok(Vec::new());
        }

        let url = self.endpoint(&["search", query, "all", &self.config.search_language]);
        let data: SearchData = self.get_data(url).await?;
        Ok(data.matches)
    }
}

#[async_trait]
impl QuranSource for AlQuranClient {
    async fn list_chapters(&self) -> Vec<Chapter> {
        match self.try_list_chapters().await {
            Ok(chapters) => {
                tracing::info!(count = chapters.len(), "Retrieved chapter catalog");
                chapters
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch chapter catalog");
                Vec::new()
            }
        }
    }

    async fn chapter_detail(&self, chapter: u16) -> Option<ChapterDetail> {
        match self.try_chapter_detail(chapter).await {
            Ok(detail) => {
                tracing::info!(chapter, verses = detail.len(), "Retrieved chapter detail");
                Some(detail)
            }
            Err(e) => {
                tracing::warn!(chapter, error = %e, "Failed to fetch chapter detail");
                None
            }
        }
    }

    async fn search_verses(&self, query: &str) -> Vec<SearchHit> {
        match self.try_search_verses(query).await {
            Ok(hits) => {
                tracing::info!(query = %query, hits = hits.len(), "Verse search complete");
                hits
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Verse search failed");
                Vec::new()
            }
        }
    }
}
