//! Remembrance catalog
//!
//! Entries are grouped into fixed occasions. A catalog is plain JSON; one is
//! compiled into the crate so the feature works offline.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

const BUNDLED_CATALOG: &str = include_str!("../data/adhkar.json");

/// Occasion a remembrance belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Morning,
    Evening,
    Sleep,
    Prayer,
    Wakeup,
    Mosque,
    Home,
    Food,
    Travel,
    /// Bathroom, dressing, ablution and other everyday moments
    Daily,
}

/// Color scheme requested by a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Category {
    /// Display order
    pub const ALL: [Category; 10] = [
        Category::Morning,
        Category::Evening,
        Category::Sleep,
        Category::Prayer,
        Category::Wakeup,
        Category::Mosque,
        Category::Home,
        Category::Food,
        Category::Travel,
        Category::Daily,
    ];

    /// Arabic display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Morning => "أذكار الصباح",
            Category::Evening => "أذكار المساء",
            Category::Sleep => "أذكار النوم",
            Category::Prayer => "أذكار بعد الصلاة",
            Category::Wakeup => "أذكار الاستيقاظ",
            Category::Mosque => "أذكار المسجد",
            Category::Home => "أذكار المنزل",
            Category::Food => "أذكار الطعام",
            Category::Travel => "أذكار السفر",
            Category::Daily => "أذكار متفرقة",
        }
    }

    /// Theme to switch to when the category is opened; `None` keeps the
    /// current one
    pub fn preferred_theme(&self) -> Option<Theme> {
        match self {
            Category::Morning => Some(Theme::Light),
            Category::Evening => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One remembrance with its repetition target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dhikr {
    pub id: u32,
    pub text: String,
    /// Repetitions needed to complete; at least 1
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtue: Option<String>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AdhkarCatalog {
    entries: Vec<Dhikr>,
}

impl AdhkarCatalog {
    /// Parse and validate a JSON array of entries
    ///
    /// Rejects zero targets and duplicate ids.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<Dhikr> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.count == 0 {
                return Err(Error::InvalidEntry {
                    id: entry.id,
                    reason: "count must be at least 1".to_string(),
                });
            }
            if !seen.insert(entry.id) {
                return Err(Error::InvalidEntry {
                    id: entry.id,
                    reason: "duplicate id".to_string(),
                });
            }
        }

        tracing::debug!(entries = entries.len(), "Loaded adhkar catalog");
        Ok(Self { entries })
    }

    /// Catalog compiled into the crate
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn entries(&self) -> &[Dhikr] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Dhikr> {
        self.entries.iter().find(|d| d.id == id)
    }

    /// Entries of one category in catalog order
    pub fn by_category(&self, category: Category) -> Vec<&Dhikr> {
        self.entries
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }
}
