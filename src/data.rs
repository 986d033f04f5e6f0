use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Satu dataset yang bisa dipilih dari menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetDescriptor {
    pub identifier: String,
    pub display_name: String,
    /// Path relatif terhadap base URL, mis. `data/0.json`.
    pub path: String,
}

impl DatasetDescriptor {
    /// Entri katalog berbentuk nama file (`"Jakarta Barat.json"`).
    pub fn from_name(name: &str) -> Self {
        Self {
            identifier: name.to_string(),
            display_name: name.replace(' ', "").replace(".json", ""),
            path: format!("data/{name}"),
        }
    }

    /// Entri katalog berbentuk `{title, sheet_id}`.
    pub fn from_sheet(title: &str, sheet_id: &str) -> Self {
        Self {
            identifier: sheet_id.to_string(),
            display_name: title.to_string(),
            path: format!("data/{sheet_id}.json"),
        }
    }

    pub fn matches(&self, key: &str) -> bool {
        self.display_name == key || self.identifier == key
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SheetId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Name(String),
    Sheet { title: String, sheet_id: SheetId },
}

/// Parse isi endpoint `/list`. Menerima array string maupun array objek.
pub fn parse_catalog(body: &[u8]) -> Result<Vec<DatasetDescriptor>, serde_json::Error> {
    let entries: Vec<CatalogEntry> = serde_json::from_slice(body)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            CatalogEntry::Name(name) => DatasetDescriptor::from_name(&name),
            CatalogEntry::Sheet { title, sheet_id } => {
                let id = match sheet_id {
                    SheetId::Number(n) => n.to_string(),
                    SheetId::Text(s) => s,
                };
                DatasetDescriptor::from_sheet(&title, &id)
            }
        })
        .collect())
}

/// Dokumen satu dataset seperti yang dipublikasikan oleh job sinkronisasi sheet.
#[derive(Clone, Debug, Deserialize)]
pub struct DatasetDocument {
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "loose_rows")]
    pub row_data: Vec<Vec<String>>,
}

impl DatasetDocument {
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

// Sel tidak divalidasi: angka/bool dijadikan teks, null jadi string kosong.
fn loose_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<Vec<Value>> = Vec::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Baris pertama jadi header, sisanya data.
    pub fn from_document(doc: &DatasetDocument) -> Self {
        let mut rows = doc.row_data.iter().cloned();
        let headers = rows.next().unwrap_or_default();
        Self {
            headers,
            rows: rows.collect(),
        }
    }

    /// Judul kolom untuk sel ke-`idx`; kosong kalau baris lebih panjang dari header.
    pub fn label(&self, idx: usize) -> &str {
        self.headers.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}
