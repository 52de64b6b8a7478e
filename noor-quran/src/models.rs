//! Quran data model
//!
//! Field names follow the remote service's camelCase JSON so responses
//! deserialize directly.

use serde::{Deserialize, Serialize};

/// Where a chapter was revealed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RevelationType {
    Meccan,
    Medinan,
    /// Not reported, e.g. a chapter known only from a search hit
    #[default]
    #[serde(other)]
    Unknown,
}

/// One of the 114 chapters (surah)
///
/// Identity is the chapter number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// 1..=114
    pub number: u16,
    /// Primary (Arabic script) name
    pub name: String,
    /// Transliterated name, e.g. "Al-Baqara"
    pub english_name: String,
    /// Translated meaning of the name, e.g. "The Cow"
    pub english_name_translation: String,
    #[serde(rename = "numberOfAyahs")]
    pub verse_count: u16,
    pub revelation_type: RevelationType,
}

/// One verse (ayah)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Verse {
    /// Global verse number across the whole text (1..=6236)
    pub number: u32,
    pub text: String,
    /// Position within its chapter, starting at 1
    pub number_in_surah: u16,
    #[serde(default)]
    pub juz: Option<u8>,
    #[serde(default)]
    pub page: Option<u16>,
}

/// Verse paired with its commentary (tafsir)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotatedVerse {
    pub verse: Verse,
    pub commentary: String,
}

/// Full chapter text with commentary, built from two index-aligned responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChapterDetail {
    pub chapter: u16,
    pub verses: Vec<AnnotatedVerse>,
}

impl ChapterDetail {
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// Chapter reference carried by a search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRef {
    pub number: u16,
    pub name: String,
    pub english_name: String,
}

impl From<&ChapterRef> for Chapter {
    /// Header-only chapter; fields the reference lacks are left empty
    fn from(reference: &ChapterRef) -> Self {
        Chapter {
            number: reference.number,
            name: reference.name.clone(),
            english_name: reference.english_name.clone(),
            english_name_translation: String::new(),
            verse_count: 0,
            revelation_type: RevelationType::Unknown,
        }
    }
}

/// One match from remote full-text search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(rename = "surah")]
    pub chapter: ChapterRef,
    /// Global verse number
    pub number: u32,
    pub number_in_surah: u16,
    pub text: String,
}
