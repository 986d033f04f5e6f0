//! Application state for one dashboard session: catalog, selected dataset,
//! search query, derived rows and pagination. Every network completion is
//! applied through this type; no state lives outside it.

use crate::{
    data::{DatasetDescriptor, DatasetDocument, Table},
    error::FetchError,
    filter::filter_rows,
    freshness,
    paginator::Paginator,
    render::PageView,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{error, info, warn};

pub const DEFAULT_DATASET: &str = "jkt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Token yang dibawa setiap fetch dataset; hanya token terbaru yang diterima.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

pub struct Dashboard {
    catalog: Vec<DatasetDescriptor>,
    selected: Option<DatasetDescriptor>,
    title: String,
    table: Table,
    query: String,
    filtered: Vec<usize>,
    paginator: Paginator,
    status: Status,
    latest_token: u64,
    updated_at: Option<DateTime<Utc>>,
    seen_updates: HashMap<String, DateTime<Utc>>,
    default_dataset: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET)
    }
}

impl Dashboard {
    pub fn new(default_dataset: &str) -> Self {
        Self {
            catalog: Vec::new(),
            selected: None,
            title: String::new(),
            table: Table::default(),
            query: String::new(),
            filtered: Vec::new(),
            paginator: Paginator::default(),
            status: Status::Idle,
            latest_token: 0,
            updated_at: None,
            seen_updates: HashMap::new(),
            default_dataset: default_dataset.to_string(),
        }
    }

    pub fn catalog(&self) -> &[DatasetDescriptor] {
        &self.catalog
    }
    pub fn selected(&self) -> Option<&DatasetDescriptor> {
        self.selected.as_ref()
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn query(&self) -> &str {
        &self.query
    }
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Indeks baris (ke `table().rows`) yang tampil di halaman aktif.
    pub fn visible_rows(&self) -> &[usize] {
        &self.filtered[self.paginator.range()]
    }

    pub fn begin_catalog(&mut self) {
        self.status = Status::Loading;
    }

    /// Terapkan hasil `/list`. Mengembalikan dataset default yang harus di-fetch.
    pub fn apply_catalog(
        &mut self,
        result: Result<Vec<DatasetDescriptor>, FetchError>,
    ) -> Option<DatasetDescriptor> {
        match result {
            Ok(catalog) => {
                info!(count = catalog.len(), "catalog loaded");
                let default = catalog
                    .iter()
                    .find(|d| d.matches(&self.default_dataset))
                    .or_else(|| catalog.first())
                    .cloned();
                self.catalog = catalog;
                if default.is_none() {
                    self.status = Status::Ready;
                }
                default
            }
            Err(e) => {
                error!(error = %e, "failed to load catalog");
                self.fail();
                None
            }
        }
    }

    /// Mulai memuat dataset; indikator loading aktif sampai token ini selesai.
    pub fn begin_load(&mut self, dataset: &DatasetDescriptor) -> RequestToken {
        self.latest_token += 1;
        self.selected = Some(dataset.clone());
        self.status = Status::Loading;
        info!(dataset = %dataset.identifier, token = self.latest_token, "loading dataset");
        RequestToken(self.latest_token)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest_token
    }

    /// Terapkan hasil fetch dataset. Respons dengan token usang dibuang (false).
    pub fn apply_dataset(
        &mut self,
        token: RequestToken,
        result: Result<DatasetDocument, FetchError>,
    ) -> bool {
        if !self.is_current(token) {
            warn!(token = token.0, latest = self.latest_token, "discarding stale response");
            return false;
        }
        match result {
            Ok(doc) => {
                if let (Some(dataset), Some(stamp)) = (&self.selected, doc.updated_at) {
                    self.seen_updates.insert(dataset.identifier.clone(), stamp);
                }
                self.title = doc.title.clone();
                self.table = Table::from_document(&doc);
                self.status = Status::Ready;
                self.refilter();
                info!(title = %self.title, rows = self.table.rows.len(), "dataset loaded");
            }
            Err(e) => {
                error!(error = %e, "failed to load dataset");
                self.fail();
            }
        }
        true
    }

    /// Kosongkan tabel, judul dan timestamp; banner error ditampilkan.
    pub fn fail(&mut self) {
        self.status = Status::Failed;
        self.title.clear();
        self.table = Table::default();
        self.filtered.clear();
        self.paginator.reset(0);
        self.updated_at = None;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_rows(&self.table.rows, &self.query);
        self.paginator.reset(self.filtered.len());
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next()
    }
    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous()
    }
    pub fn first_page(&mut self) -> bool {
        self.paginator.first()
    }
    pub fn last_page(&mut self) -> bool {
        self.paginator.last()
    }
    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.paginator.go_to(page)
    }

    /// Hasil endpoint `last_updated`. Kalau gagal, pakai `updated_at` terbaru
    /// dari dokumen yang sudah dimuat; kalau itu pun kosong, biarkan apa adanya.
    pub fn apply_freshness(&mut self, result: Result<DateTime<Utc>, FetchError>) {
        if self.status == Status::Failed {
            return;
        }
        match result {
            Ok(stamp) => self.updated_at = Some(stamp),
            Err(e) => {
                tracing::debug!(error = %e, "last_updated unavailable");
                if let Some(stamp) = freshness::latest(self.seen_updates.values().copied()) {
                    self.updated_at = Some(stamp);
                }
            }
        }
    }

    pub fn relative_updated(&self, now: DateTime<Utc>) -> Option<String> {
        self.updated_at.map(|t| freshness::since(t, now))
    }

    /// View untuk renderer HTML. `all_pages` menampilkan semua baris terfilter.
    pub fn page_view(
        &self,
        now: DateTime<Utc>,
        all_pages: bool,
        stylesheet: Option<String>,
    ) -> PageView<'_> {
        PageView {
            title: &self.title,
            updated: self.relative_updated(now),
            table: &self.table,
            rows: if all_pages {
                &self.filtered
            } else {
                self.visible_rows()
            },
            paginator: (!all_pages).then_some(self.paginator),
            failed: self.status == Status::Failed,
            stylesheet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{data::parse_catalog, render};
    use chrono::TimeZone;

    fn doc(json: &str) -> DatasetDocument {
        DatasetDocument::parse(json.as_bytes()).unwrap()
    }

    fn numbered(n: usize) -> DatasetDocument {
        let mut rows = vec![vec!["No".to_string(), "Kota".to_string()]];
        rows.extend((0..n).map(|i| {
            let kota = if i % 2 == 0 { "Depok" } else { "Bogor" };
            vec![i.to_string(), kota.to_string()]
        }));
        DatasetDocument {
            title: "Angka".into(),
            updated_at: None,
            row_data: rows,
        }
    }

    fn loaded(n: usize) -> Dashboard {
        let mut d = Dashboard::default();
        let t = d.begin_load(&DatasetDescriptor::from_sheet("x", "1"));
        d.apply_dataset(t, Ok(numbered(n)));
        d
    }

    #[test]
    fn jakarta_scenario_renders_expected_table() {
        let mut d = Dashboard::default();
        let catalog = parse_catalog(br#"[{"title":"jkt","sheet_id":"0"}]"#).unwrap();
        let default = d.apply_catalog(Ok(catalog)).unwrap();
        assert_eq!(default.path, "data/0.json");

        let token = d.begin_load(&default);
        assert_eq!(d.status(), Status::Loading);
        assert!(d.apply_dataset(
            token,
            Ok(doc(
                r#"{"title":"Jakarta","row_data":[["Nama","Link"],["Budi","http://x"],["Ani",""]]}"#
            ))
        ));

        assert_eq!(d.title(), "Jakarta");
        assert_eq!(d.table().headers, vec!["Nama", "Link"]);
        assert_eq!(d.visible_rows(), &[0, 1]);

        let body = render::render_body(d.table(), d.visible_rows());
        let rows: Vec<&str> = body.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains(r#"<a href="http://x" target="_blank">link</a>"#));
        assert!(rows[1].contains(r#"<td data-label="Link">-</td>"#));
    }

    #[test]
    fn catalog_failure_shows_banner_and_clears_table() {
        let mut d = loaded(3);
        d.apply_freshness(Ok(Utc::now()));
        let next = d.apply_catalog(Err(FetchError::Status {
            url: "http://api.test/list".into(),
            code: 503,
        }));
        assert!(next.is_none());
        assert_eq!(d.status(), Status::Failed);
        assert!(d.table().is_empty());
        assert!(d.title().is_empty());
        assert!(d.updated_at().is_none());

        let html = render::render_page(&d.page_view(Utc::now(), false, None));
        assert!(html.contains(render::ERROR_BANNER));
    }

    #[test]
    fn default_selection_prefers_jkt_then_first() {
        let mut d = Dashboard::default();
        let catalog = parse_catalog(br#"["bdg.json", "jkt.json"]"#).unwrap();
        assert_eq!(d.apply_catalog(Ok(catalog)).unwrap().identifier, "jkt.json");

        let mut d = Dashboard::default();
        let catalog = parse_catalog(br#"["bdg.json", "sby.json"]"#).unwrap();
        assert_eq!(d.apply_catalog(Ok(catalog)).unwrap().identifier, "bdg.json");

        let mut d = Dashboard::new("sby");
        let catalog = parse_catalog(br#"["bdg.json", "sby.json"]"#).unwrap();
        assert_eq!(d.apply_catalog(Ok(catalog)).unwrap().identifier, "sby.json");
    }

    #[test]
    fn empty_catalog_is_ready_with_nothing_to_load() {
        let mut d = Dashboard::default();
        d.begin_catalog();
        assert!(d.apply_catalog(Ok(Vec::new())).is_none());
        assert_eq!(d.status(), Status::Ready);
        assert!(d.visible_rows().is_empty());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut d = Dashboard::default();
        let a = DatasetDescriptor::from_sheet("a", "1");
        let b = DatasetDescriptor::from_sheet("b", "2");
        let ta = d.begin_load(&a);
        let tb = d.begin_load(&b);
        assert!(ta < tb);

        assert!(d.apply_dataset(tb, Ok(doc(r#"{"title":"B","row_data":[["h"],["b"]]}"#))));
        assert!(!d.apply_dataset(ta, Ok(doc(r#"{"title":"A","row_data":[["h"],["a"]]}"#))));
        assert_eq!(d.title(), "B");
        assert_eq!(d.selected(), Some(&b));
        assert_eq!(d.status(), Status::Ready);
    }

    #[test]
    fn document_without_rows_shows_banner() {
        let mut d = loaded(5);
        let t = d.begin_load(&DatasetDescriptor::from_sheet("y", "2"));
        let result = DatasetDocument::parse(b"{}")
            .map_err(|e| FetchError::parse("http://api.test/data/2.json", e));
        assert!(result.is_err());
        d.apply_dataset(t, result);
        assert_eq!(d.status(), Status::Failed);
        assert!(d.table().is_empty());

        let html = render::render_page(&d.page_view(Utc::now(), false, None));
        assert!(html.contains(render::ERROR_BANNER));
    }

    #[test]
    fn dataset_failure_clears_everything() {
        let mut d = loaded(12);
        let t = d.begin_load(&DatasetDescriptor::from_sheet("y", "2"));
        d.apply_dataset(
            t,
            Err(FetchError::Status {
                url: "http://api.test/data/2.json".into(),
                code: 500,
            }),
        );
        assert_eq!(d.status(), Status::Failed);
        assert!(d.filtered().is_empty());
        assert_eq!(d.paginator().total(), 0);
    }

    #[test]
    fn query_filters_and_resets_page() {
        let mut d = loaded(25);
        assert_eq!(d.paginator().total(), 3);
        d.last_page();
        d.set_query("depok");
        assert_eq!(d.filtered().len(), 13);
        assert_eq!(d.paginator().page(), 1);
        assert_eq!(d.paginator().total(), 2);
        assert!(d.visible_rows().iter().all(|&i| i % 2 == 0));

        d.set_query("");
        assert_eq!(d.filtered().len(), 25);
    }

    #[test]
    fn query_survives_dataset_switch() {
        let mut d = loaded(4);
        d.set_query("bogor");
        let t = d.begin_load(&DatasetDescriptor::from_sheet("z", "3"));
        d.apply_dataset(t, Ok(numbered(6)));
        assert_eq!(d.query(), "bogor");
        assert_eq!(d.filtered(), &[1, 3, 5]);
    }

    #[test]
    fn navigation_is_noop_at_boundaries() {
        let mut d = loaded(15);
        assert!(!d.previous_page());
        assert!(d.next_page());
        assert_eq!(d.visible_rows(), &[10, 11, 12, 13, 14]);
        assert!(!d.next_page());
        assert!(d.first_page());
        assert_eq!(d.visible_rows().len(), 10);
    }

    #[test]
    fn freshness_falls_back_to_latest_document() {
        let mut d = Dashboard::default();
        let early = Utc.with_ymd_and_hms(2021, 7, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2021, 7, 4, 0, 0, 0).unwrap();
        for (id, stamp) in [("1", late), ("2", early)] {
            let t = d.begin_load(&DatasetDescriptor::from_sheet(id, id));
            let mut doc = numbered(1);
            doc.updated_at = Some(stamp);
            d.apply_dataset(t, Ok(doc));
        }
        d.apply_freshness(Err(FetchError::Status {
            url: "http://api.test/data/last_updated.json".into(),
            code: 404,
        }));
        assert_eq!(d.updated_at(), Some(late));

        let now = Utc.with_ymd_and_hms(2021, 7, 7, 0, 0, 0).unwrap();
        assert_eq!(d.relative_updated(now).as_deref(), Some("3 hari yg lalu"));
    }

    #[test]
    fn page_view_can_span_all_pages() {
        let d = loaded(23);
        assert_eq!(d.page_view(Utc::now(), true, None).rows.len(), 23);
        assert_eq!(d.page_view(Utc::now(), false, None).rows.len(), 10);
    }
}
