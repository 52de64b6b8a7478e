//! Static reciter catalog
//!
//! Fixed at build time. The first entry is the session default.

use serde::Serialize;

/// Named audio source with one file per chapter under `base_url`
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Reciter {
    pub id: &'static str,
    pub name: &'static str,
    /// Ends with `/`; chapter files are `{base_url}{NNN}.mp3`
    pub base_url: &'static str,
}

pub const RECITERS: &[Reciter] = &[
    Reciter { id: "alafasy", name: "مشاري العفاسي", base_url: "https://server8.mp3quran.net/afs/" },
    Reciter { id: "sudais", name: "عبدالرحمن السديس", base_url: "https://server11.mp3quran.net/sds/" },
    Reciter { id: "shuraim", name: "سعود الشريم", base_url: "https://server7.mp3quran.net/shur/" },
    Reciter { id: "maher", name: "ماهر المعيقلي", base_url: "https://server12.mp3quran.net/maher/" },
    Reciter { id: "ghamdi", name: "سعد الغامدي", base_url: "https://server7.mp3quran.net/s_gmd/" },
    Reciter { id: "ajmy", name: "أحمد العجمي", base_url: "https://server10.mp3quran.net/ajm/" },
    Reciter { id: "hussary", name: "محمود خليل الحصري", base_url: "https://server13.mp3quran.net/husr/" },
    Reciter { id: "abdulbasit", name: "عبدالباسط عبدالصمد (مرتل)", base_url: "https://server7.mp3quran.net/basit/" },
    Reciter { id: "minshawi", name: "محمد صديق المنشاوي", base_url: "https://server10.mp3quran.net/minsh/" },
    Reciter { id: "dosari", name: "ياسر الدوسري", base_url: "https://server11.mp3quran.net/yasser/" },
    Reciter { id: "banna", name: "محمود علي البنا", base_url: "https://server8.mp3quran.net/bna/" },
    Reciter { id: "juhany", name: "عبدالله الجهني", base_url: "https://server13.mp3quran.net/jhn/" },
];

impl Reciter {
    /// Catalog default (first entry)
    pub fn default_reciter() -> Reciter {
        RECITERS[0]
    }

    pub fn find(id: &str) -> Option<Reciter> {
        RECITERS.iter().copied().find(|r| r.id == id)
    }
}

impl Default for Reciter {
    fn default() -> Self {
        Self::default_reciter()
    }
}
