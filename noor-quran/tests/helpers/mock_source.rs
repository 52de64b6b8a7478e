//! In-memory QuranSource with call counting and per-request gates
//!
//! A gate holds a fetch until the test releases it, which lets tests force
//! responses to complete out of order.

use async_trait::async_trait;
use noor_quran::audio::{AudioSink, UrlOpener};
use noor_quran::content::{merge_commentary, QuranSource};
use noor_quran::models::{Chapter, ChapterDetail, ChapterRef, RevelationType, SearchHit, Verse};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn chapter(number: u16, name: &str, english_name: &str) -> Chapter {
    Chapter {
        number,
        name: name.to_string(),
        english_name: english_name.to_string(),
        english_name_translation: String::new(),
        verse_count: 3,
        revelation_type: RevelationType::Meccan,
    }
}

fn verse(chapter: u16, n: u16, text: String) -> Verse {
    Verse {
        number: chapter as u32 * 1000 + n as u32,
        text,
        number_in_surah: n,
        juz: None,
        page: None,
    }
}

fn detail_for(chapter: u16) -> ChapterDetail {
    let verses = (1..=3).map(|n| verse(chapter, n, format!("{}:{}", chapter, n))).collect();
    let commentary = (1..=3)
        .map(|n| verse(chapter, n, format!("tafsir {}:{}", chapter, n)))
        .collect();
    merge_commentary(chapter, verses, commentary)
}

pub struct MockSource {
    chapters: Vec<Chapter>,
    failing_details: HashSet<u16>,
    hits: Vec<SearchHit>,
    detail_gates: Mutex<HashMap<u16, Arc<Notify>>>,
    search_gate: Mutex<Option<Arc<Notify>>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    search_calls: AtomicUsize,
    detail_requests: Mutex<Vec<u16>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            chapters: vec![
                chapter(1, "سورة الفاتحة", "Al-Faatiha"),
                chapter(2, "سورة البقرة", "Al-Baqara"),
                chapter(3, "سورة آل عمران", "Aal-i-Imraan"),
                chapter(12, "سورة يوسف", "Yusuf"),
            ],
            failing_details: HashSet::new(),
            hits: vec![SearchHit {
                chapter: ChapterRef {
                    number: 12,
                    name: "سورة يوسف".to_string(),
                    english_name: "Yusuf".to_string(),
                },
                number: 1597,
                number_in_surah: 1,
                text: "الر ۚ تِلْكَ آيَاتُ الْكِتَابِ الْمُبِينِ".to_string(),
            }],
            detail_gates: Mutex::new(HashMap::new()),
            search_gate: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            search_calls: AtomicUsize::new(0),
            detail_requests: Mutex::new(Vec::new()),
        }
    }

    /// Source whose catalog fetch fails
    pub fn unavailable() -> Self {
        Self {
            chapters: Vec::new(),
            ..Self::new()
        }
    }

    pub fn failing_detail(mut self, chapter: u16) -> Self {
        self.failing_details.insert(chapter);
        self
    }

    /// Hold detail fetches for `chapter` until the returned gate is notified
    pub fn gate_detail(&self, chapter: u16) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.detail_gates
            .lock()
            .unwrap()
            .insert(chapter, Arc::clone(&gate));
        gate
    }

    /// Hold search requests until the returned gate is notified
    pub fn gate_search(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.search_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn detail_requests(&self) -> Vec<u16> {
        self.detail_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuranSource for MockSource {
    async fn list_chapters(&self) -> Vec<Chapter> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.chapters.clone()
    }

    async fn chapter_detail(&self, chapter: u16) -> Option<ChapterDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail_requests.lock().unwrap().push(chapter);

        let gate = self.detail_gates.lock().unwrap().get(&chapter).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing_details.contains(&chapter) {
            None
        } else {
            Some(detail_for(chapter))
        }
    }

    async fn search_verses(&self, query: &str) -> Vec<SearchHit> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.search_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.hits
            .iter()
            .filter(|hit| hit.text.contains(query))
            .cloned()
            .collect()
    }
}

/// AudioSink that records every transport command
#[derive(Clone, Default)]
pub struct RecordingSink(Arc<Mutex<Vec<String>>>);

impl RecordingSink {
    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

impl AudioSink for RecordingSink {
    fn load(&mut self, url: &str) {
        self.0.lock().unwrap().push(format!("load {}", url));
    }
    fn play(&mut self) {
        self.0.lock().unwrap().push("play".to_string());
    }
    fn pause(&mut self) {
        self.0.lock().unwrap().push("pause".to_string());
    }
    fn stop(&mut self) {
        self.0.lock().unwrap().push("stop".to_string());
    }
}

/// UrlOpener that records opened URLs
#[derive(Default)]
pub struct RecordingOpener(Mutex<Vec<String>>);

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) {
        self.0.lock().unwrap().push(url.to_string());
    }
}
