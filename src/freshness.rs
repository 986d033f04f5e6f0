use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Isi `data/last_updated.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct LastUpdated {
    #[serde(default)]
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

impl LastUpdated {
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

// Pembagi tetap, tanpa aritmetika kalender.
const UNITS: [(i64, &str); 6] = [
    (365 * 86_400, "tahun"),
    (30 * 86_400, "bulan"),
    (86_400, "hari"),
    (3_600, "jam"),
    (60, "menit"),
    (1, "detik"),
];

/// `"3 hari yg lalu"` untuk selisih detik yang diberikan.
pub fn relative_time(elapsed_secs: i64) -> String {
    for (size, label) in UNITS {
        let n = elapsed_secs / size;
        if n >= 1 {
            return format!("{n} {label} yg lalu");
        }
    }
    "baru saja".to_string()
}

pub fn since(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    relative_time((now - updated_at).num_seconds())
}

/// Timestamp terbaru di antara semua dokumen yang pernah dimuat.
pub fn latest<I>(stamps: I) -> Option<DateTime<Utc>>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    stamps.into_iter().max()
}
