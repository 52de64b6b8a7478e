//! # Noor Quran
//!
//! Quran reader/listener core:
//! - [`content`]: remote chapter catalog, chapter text + commentary, verse search
//! - [`session`]: reading/listening session controller
//! - [`audio`]: single-handle audio playback adapter
//! - [`search`]: local chapter filter and remote verse search
//! - [`reciters`]: static reciter catalog

pub mod audio;
pub mod content;
pub mod error;
pub mod models;
pub mod reciters;
pub mod search;
pub mod session;

pub use audio::{AudioPlayer, AudioSink, UrlOpener};
pub use content::{build_audio_url, AlQuranClient, ContentError, QuranSource};
pub use error::{Error, Result};
pub use models::{AnnotatedVerse, Chapter, ChapterDetail, ChapterRef, RevelationType, SearchHit, Verse};
pub use reciters::{Reciter, RECITERS};
pub use session::{DetailOutcome, QuranSession, SessionSnapshot, ViewMode};
