//! In-process fake of the Quran content REST service
//!
//! Canned behavior:
//! - chapter 1: text has 3 verses, commentary only 2
//! - chapter 2: commentary endpoint returns HTTP 500
//! - chapter 3: envelope code 404
//! - other chapters: 3 verses, 3 commentary entries
//! - search for "رب" returns two matches; anything else is "Not Found"

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct FakeService {
    requests: Arc<AtomicUsize>,
}

impl FakeService {
    /// Bind to an ephemeral port; returns the service and its API base URL
    pub async fn start() -> (Self, String) {
        let service = FakeService::default();
        let app = Router::new()
            .route("/v1/surah", get(surah_list))
            .route("/v1/surah/:number/:edition", get(surah_edition))
            .route("/v1/search/:query/all/:language", get(search))
            .with_state(service.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake service");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake service");
        });

        (service, format!("http://{}/v1", addr))
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({ "code": 200, "status": "OK", "data": data }))
}

fn edition(number: u16, prefix: &str, count: u16) -> Value {
    let ayahs: Vec<Value> = (1..=count)
        .map(|n| {
            json!({
                "number": number as u32 * 1000 + n as u32,
                "text": format!("{} {}:{}", prefix, number, n),
                "numberInSurah": n,
                "juz": 1,
                "page": 1,
                "sajda": false
            })
        })
        .collect();
    json!({ "number": number, "name": "سورة", "ayahs": ayahs })
}

async fn surah_list(State(service): State<FakeService>) -> Json<Value> {
    service.hit();
    ok(json!([
        {
            "number": 1,
            "name": "سُورَةُ ٱلْفَاتِحَةِ",
            "englishName": "Al-Faatiha",
            "englishNameTranslation": "The Opening",
            "numberOfAyahs": 7,
            "revelationType": "Meccan"
        },
        {
            "number": 2,
            "name": "سورة البقرة",
            "englishName": "Al-Baqara",
            "englishNameTranslation": "The Cow",
            "numberOfAyahs": 286,
            "revelationType": "Medinan"
        }
    ]))
}

async fn surah_edition(
    State(service): State<FakeService>,
    Path((number, edition_name)): Path<(u16, String)>,
) -> Response {
    service.hit();
    let is_text = edition_name == "quran-uthmani";
    match number {
        1 if is_text => ok(edition(1, "text", 3)).into_response(),
        1 => ok(edition(1, "tafsir", 2)).into_response(),
        2 if !is_text => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        3 => Json(json!({ "code": 404, "status": "Not Found", "data": "Surah not found" }))
            .into_response(),
        n if is_text => ok(edition(n, "text", 3)).into_response(),
        n => ok(edition(n, "tafsir", 3)).into_response(),
    }
}

async fn search(
    State(service): State<FakeService>,
    Path((query, _language)): Path<(String, String)>,
) -> Json<Value> {
    service.hit();
    if query != "رب" {
        return Json(json!({ "code": 404, "status": "Not Found", "data": "Nothing found" }));
    }
    ok(json!({
        "count": 2,
        "matches": [
            {
                "number": 2,
                "text": "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ",
                "edition": { "identifier": "quran-simple" },
                "surah": { "number": 1, "name": "سُورَةُ ٱلْفَاتِحَةِ", "englishName": "Al-Faatiha" },
                "numberInSurah": 2
            },
            {
                "number": 5,
                "text": "أُو۟لَٰٓئِكَ عَلَىٰ هُدًى مِّن رَّبِّهِمْ",
                "edition": { "identifier": "quran-simple" },
                "surah": { "number": 2, "name": "سورة البقرة", "englishName": "Al-Baqara" },
                "numberInSurah": 5
            }
        ]
    }))
}
