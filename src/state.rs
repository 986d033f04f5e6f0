use crate::{
    api::Api,
    dashboard::{Dashboard, Status},
    detail::RowDetail,
    fetch::Fetch,
    filter::{Debounce, Filter, SearchAction},
    float::{Float, FloatContent},
    hint::Shortcut,
    loader::{LoadEvent, spawn_catalog, spawn_dataset, spawn_freshness},
    loading::LoadingFloat,
    quit::ConfirmQuit,
    render::{CellKind, ERROR_BANNER, PLACEHOLDER, classify, render_page},
    terminal_check::{draw_too_small_warning, is_too_small},
    theme::Theme,
};
use anyhow::{Context, Result};
use chrono::Utc;
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Wrap},
};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Catalog,
    Table,
}

pub struct App<F: Fetch> {
    theme: Theme,
    focus: Focus,
    dashboard: Dashboard,
    api: Api<F>,
    tx: UnboundedSender<LoadEvent>,
    rx: UnboundedReceiver<LoadEvent>,
    list_state: ListState,
    /// Baris yang difokuskan di halaman aktif.
    table_scroll: usize,
    filter: Filter,
    debounce: Debounce,
    confirm_quit: Option<Float<ConfirmQuit>>,
    detail_float: Option<Float<RowDetail>>,
    loading_float: Option<Float<LoadingFloat>>,
    notice: Option<String>,
    export_dir: PathBuf,
}

impl<F: Fetch> App<F> {
    pub fn new(api: Api<F>, dashboard: Dashboard) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            theme: Theme::detect(),
            focus: Focus::Catalog,
            dashboard,
            api,
            tx,
            rx,
            list_state: ListState::default(),
            table_scroll: 0,
            filter: Filter::default(),
            debounce: Debounce::default(),
            confirm_quit: None,
            detail_float: None,
            loading_float: None,
            notice: None,
            export_dir: PathBuf::from("export"),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Muat katalog sekali di awal; dataset default menyusul setelah katalog tiba.
    pub fn start(&mut self) {
        self.dashboard.begin_catalog();
        spawn_catalog(&self.api, &self.tx);
        self.sync_loading();
    }

    fn load_selected(&mut self) {
        let Some(dataset) = self
            .list_state
            .selected()
            .and_then(|i| self.dashboard.catalog().get(i))
            .cloned()
        else {
            return;
        };
        let token = self.dashboard.begin_load(&dataset);
        spawn_dataset(&self.api, &self.tx, token, dataset);
        spawn_freshness(&self.api, &self.tx);
        self.table_scroll = 0;
        self.sync_loading();
    }

    fn reload(&mut self) {
        if self.dashboard.catalog().is_empty() {
            self.start();
        } else {
            self.load_selected();
        }
    }

    pub fn handle_event(&mut self, ev: LoadEvent) {
        match ev {
            LoadEvent::Catalog(result) => {
                if let Some(default) = self.dashboard.apply_catalog(result) {
                    let idx = self
                        .dashboard
                        .catalog()
                        .iter()
                        .position(|d| *d == default);
                    self.list_state.select(idx);
                    self.load_selected();
                }
            }
            LoadEvent::Dataset(token, result) => {
                if self.dashboard.apply_dataset(token, result) {
                    self.table_scroll = 0;
                    self.detail_float = None;
                }
            }
            LoadEvent::Freshness(result) => self.dashboard.apply_freshness(result),
        }
        self.sync_loading();
    }

    /// Ambil semua hasil background yang sudah selesai tanpa blocking.
    pub fn pump_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(ev) => self.handle_event(ev),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Terapkan query kalau jeda debounce sudah lewat.
    pub fn tick(&mut self, now: Instant) {
        if self.debounce.fire(now) {
            self.apply_query();
        }
    }

    fn apply_query(&mut self) {
        let term = self.filter.term();
        info!(query = %term, "search");
        self.dashboard.set_query(&term);
        self.table_scroll = 0;
    }

    fn sync_loading(&mut self) {
        if self.dashboard.status() == Status::Loading {
            if self.loading_float.is_none() {
                self.loading_float = Some(Float::new_absolute(
                    Box::new(LoadingFloat::new("Memuat data...")),
                    40,
                    3,
                ));
            }
        } else {
            self.loading_float = None;
        }
    }

    pub fn run(
        &mut self,
        term: &mut Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        self.start();
        loop {
            self.pump_events();
            self.tick(Instant::now());
            term.draw(|f| self.draw(f))?;
            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Release {
                    continue;
                }
                if !self.handle_key(k, Instant::now()) {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Returns false when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if let Some(ref mut float) = self.detail_float {
            if float.handle_key_event(&key) && float.content.is_finished() {
                self.detail_float = None;
            }
            return true;
        }

        if let Some(ref mut float) = self.confirm_quit {
            float.handle_key_event(&key);
            if float.content.is_finished() {
                let confirmed = float.content.confirmed();
                self.confirm_quit = None;
                if confirmed {
                    return false;
                }
            }
            return true;
        }

        if self.filter.active() {
            match self.filter.handle_key(&key) {
                SearchAction::Update => self.debounce.schedule(now),
                SearchAction::Commit => {
                    self.debounce.cancel();
                    self.filter.deactivate();
                    self.apply_query();
                }
                SearchAction::Exit => {
                    self.debounce.cancel();
                    self.filter.deactivate();
                }
                SearchAction::None => {}
            }
            return true;
        }

        self.notice = None;
        match key.code {
            KeyCode::Char('q') => {
                let loading = self.dashboard.status() == Status::Loading;
                self.confirm_quit = Some(Float::new_absolute(Box::new(ConfirmQuit::new(loading)), 40, 7));
            }
            KeyCode::Char('/') => self.filter.activate(),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Catalog => Focus::Table,
                    Focus::Table => Focus::Catalog,
                };
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('e') => self.export_page(),
            code => match self.focus {
                Focus::Catalog => self.handle_key_catalog(code),
                Focus::Table => self.handle_key_table(code),
            },
        }
        true
    }

    fn handle_key_catalog(&mut self, code: KeyCode) {
        use KeyCode::*;
        let len = self.dashboard.catalog().len();
        match code {
            Up | Char('k') => {
                let i = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some(i.saturating_sub(1)));
            }
            Down | Char('j') if len > 0 => {
                let i = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
                self.list_state.select(Some(i));
            }
            Enter | Right | Char('l') => {
                self.load_selected();
                self.focus = Focus::Table;
            }
            _ => {}
        }
    }

    fn handle_key_table(&mut self, code: KeyCode) {
        use KeyCode::*;
        let page_len = self.dashboard.visible_rows().len();
        let moved = match code {
            Down | Char('j') => {
                if self.table_scroll + 1 < page_len {
                    self.table_scroll += 1;
                }
                false
            }
            Up | Char('k') => {
                self.table_scroll = self.table_scroll.saturating_sub(1);
                false
            }
            Left | Char('h') => self.dashboard.previous_page(),
            Right | Char('l') => self.dashboard.next_page(),
            Home | Char('g') => self.dashboard.first_page(),
            End | Char('G') => self.dashboard.last_page(),
            Enter => {
                self.open_detail();
                false
            }
            Esc | Backspace => {
                self.focus = Focus::Catalog;
                false
            }
            _ => false,
        };
        if moved {
            self.table_scroll = 0;
        }
    }

    fn open_detail(&mut self) {
        let Some(&ri) = self.dashboard.visible_rows().get(self.table_scroll) else {
            return;
        };
        let table = self.dashboard.table();
        if let Some(row) = table.rows.get(ri) {
            self.detail_float = Some(Float::new(Box::new(RowDetail::new(table, row)), 60, 60));
        }
    }

    fn export_page(&mut self) {
        let name = self
            .dashboard
            .selected()
            .map(|d| d.display_name.clone())
            .unwrap_or_else(|| "dataset".into());
        let path = self
            .export_dir
            .join(format!("{}-hal{}.html", name, self.dashboard.paginator().page()));
        let html = render_page(&self.dashboard.page_view(Utc::now(), false, None));
        let result = std::fs::create_dir_all(&self.export_dir)
            .and_then(|_| std::fs::write(&path, html))
            .with_context(|| format!("write {}", path.display()));
        self.notice = Some(match result {
            Ok(()) => format!("Disimpan ke {}", path.display()),
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                format!("Gagal menyimpan: {e}")
            }
        });
    }

    fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        if is_too_small(area) {
            draw_too_small_warning(f, area);
            return;
        }

        // Tinggi hint mengikuti jumlah baris shortcut
        let (_title, shortcuts) = self.get_current_shortcuts();
        let lines = crate::hint::create_shortcut_list(shortcuts, area.width);
        let hint_height = (lines.len() as u16 + 2).clamp(3, 8);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(hint_height),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(self.header_text()).style(Style::default().fg(self.theme.title_color())),
            chunks[0],
        );

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(chunks[1]);
        self.draw_catalog(f, body[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(body[1]);
        self.filter.draw(f, right[0]);
        self.draw_table(f, right[1]);

        self.draw_hint(f, chunks[2]);

        if let Some(ref mut float) = self.confirm_quit {
            float.draw(f, area, &self.theme);
        }
        if let Some(ref mut float) = self.detail_float {
            float.draw(f, area, &self.theme);
        }
        if let Some(ref mut float) = self.loading_float {
            float.draw(f, area, &self.theme);
        }
    }

    fn header_text(&self) -> String {
        let mut text = String::from("WBW Dashboard");
        if self.dashboard.status() != Status::Failed {
            if !self.dashboard.title().is_empty() {
                text.push_str(&format!("  |  {}", self.dashboard.title()));
            }
            if let Some(updated) = self.dashboard.relative_updated(Utc::now()) {
                text.push_str(&format!("  |  Diperbarui {updated}"));
            }
        }
        if let Some(ref notice) = self.notice {
            text.push_str(&format!("  |  {notice}"));
        }
        text
    }

    fn border_style(&self, focus: Focus) -> Style {
        let color = if self.focus == focus {
            self.theme.focused_color()
        } else {
            self.theme.unfocused_color()
        };
        Style::default().fg(color)
    }

    fn draw_catalog(&mut self, f: &mut Frame, area: Rect) {
        let items = self
            .dashboard
            .catalog()
            .iter()
            .map(|d| ListItem::new(d.display_name.clone()).style(Style::default().fg(self.theme.menu_color())))
            .collect::<Vec<_>>();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(self.border_style(Focus::Catalog))
            .title(" Dataset ");
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(self.theme.selection_fg())
                .bg(self.theme.selection_bg())
                .add_modifier(Modifier::BOLD),
        );

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_table(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(self.border_style(Focus::Table));

        if self.dashboard.status() == Status::Failed {
            let p = Paragraph::new(ERROR_BANNER)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(
                    Style::default()
                        .fg(Color::White)
                        .bg(self.theme.error_bg())
                        .add_modifier(Modifier::BOLD),
                )
                .block(block.title(" Error "));
            f.render_widget(p, area);
            return;
        }

        let table = self.dashboard.table();
        if table.is_empty() {
            let p = Paragraph::new("Tidak ada data")
                .style(Style::default().fg(self.theme.info_color()))
                .block(block.title(" Info "));
            f.render_widget(p, area);
            return;
        }

        let header = Row::new(table.headers.iter().map(|h| {
            Cell::from(h.as_str()).style(
                Style::default()
                    .fg(self.theme.table_header())
                    .bg(self.theme.border_color())
                    .add_modifier(Modifier::BOLD),
            )
        }));

        let visible = self.dashboard.visible_rows();
        let rows = visible
            .iter()
            .filter_map(|&ri| table.rows.get(ri))
            .enumerate()
            .map(|(i, r)| {
                let base = if i == self.table_scroll && self.focus == Focus::Table {
                    Style::default()
                        .bg(self.theme.selection_bg())
                        .fg(self.theme.selection_fg())
                        .add_modifier(Modifier::BOLD)
                } else if i % 2 == 0 {
                    Style::default().bg(self.theme.table_row_even())
                } else {
                    Style::default().bg(self.theme.table_row_odd())
                };
                Row::new(r.iter().map(|v| match classify(v) {
                    CellKind::Link(url) => Cell::from(url.to_string()).style(
                        base.fg(self.theme.link_color())
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                    CellKind::Text(text) => Cell::from(text.to_string()).style(base),
                    CellKind::Empty => Cell::from(PLACEHOLDER).style(base),
                }))
            })
            .collect::<Vec<_>>();

        let p = self.dashboard.paginator();
        let nav = |label: &'static str, enabled: bool| {
            let style = if enabled {
                Style::default().fg(self.theme.focused_color())
            } else {
                Style::default().fg(self.theme.muted_color()).add_modifier(Modifier::DIM)
            };
            Span::styled(label, style)
        };
        let pager = Line::from(vec![
            nav(" « ", p.has_previous()),
            nav("‹ ", p.has_previous()),
            Span::raw(format!("Halaman {}/{}", p.page(), p.total())),
            nav(" ›", p.has_next()),
            nav(" » ", p.has_next()),
        ]);

        let widths = self.auto_widths(area.width);
        let widget = ratatui::widgets::Table::new(rows, widths).header(header).block(
            block
                .title(format!(
                    " {} - {} baris ",
                    self.dashboard.title(),
                    self.dashboard.filtered().len()
                ))
                .title_bottom(pager.right_aligned()),
        );
        f.render_widget(widget, area);
    }

    fn auto_widths(&self, total: u16) -> Vec<Constraint> {
        let cols = self.dashboard.table().headers.len().max(1) as u16;
        let w = total.saturating_sub(4).saturating_div(cols);
        (0..cols).map(|_| Constraint::Length(w)).collect()
    }

    fn draw_hint(&self, f: &mut Frame, area: Rect) {
        let (title, shortcuts) = self.get_current_shortcuts();
        let lines = crate::hint::create_shortcut_list(shortcuts, area.width);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .title(format!(" Shortcut {} ", title));

        let para = Paragraph::new(lines.to_vec())
            .block(block)
            .wrap(Wrap { trim: false });

        f.render_widget(para, area);
    }

    fn get_current_shortcuts(&self) -> (&str, Box<[Shortcut]>) {
        if let Some(ref float) = self.detail_float {
            return float.get_shortcut_list();
        }
        if let Some(ref float) = self.confirm_quit {
            return float.get_shortcut_list();
        }
        if self.filter.active() {
            return (
                "Cari",
                crate::shortcuts!(
                    ("Terapkan", ["Enter"]),
                    ("Tutup", ["Esc"]),
                    ("Geser kursor", ["←", "→"]),
                    ("Hapus", ["Backspace"]),
                ),
            );
        }
        match self.focus {
            Focus::Catalog => (
                "Dataset",
                crate::shortcuts!(
                    ("Pindah", ["j", "k", "↑", "↓"]),
                    ("Pilih", ["Enter", "l", "→"]),
                    ("Tabel", ["Tab"]),
                    ("Cari", ["/"]),
                    ("Muat ulang", ["r"]),
                    ("Keluar", ["q"]),
                ),
            ),
            Focus::Table => (
                "Tabel",
                crate::shortcuts!(
                    ("Detail", ["Enter"]),
                    ("Baris", ["j", "k"]),
                    ("Halaman", ["h", "l", "←", "→"]),
                    ("Awal/akhir", ["g", "G"]),
                    ("Cari", ["/"]),
                    ("Simpan HTML", ["e"]),
                    ("Dataset", ["Tab", "Esc"]),
                    ("Keluar", ["q"]),
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dashboard::RequestToken, data::DatasetDocument, fetch::stub::StubFetch};
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    const DOC: &str = r#"{"title":"Jakarta","row_data":[["Nama","Link"],["Budi","http://x"],["Ani",""]]}"#;

    fn app() -> App<StubFetch> {
        let api = Api::new(
            "http://api.test",
            Arc::new(
                StubFetch::new()
                    .with("http://api.test/list", r#"[{"title":"jkt","sheet_id":"0"}]"#)
                    .with("http://api.test/data/0.json", DOC),
            ),
        );
        App::new(api, Dashboard::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn screen(app: &mut App<StubFetch>) -> String {
        let mut term = Terminal::new(TestBackend::new(120, 30)).unwrap();
        term.draw(|f| app.draw(f)).unwrap();
        term.backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    async fn settle(app: &mut App<StubFetch>, events: usize) {
        for _ in 0..events {
            let ev = app.rx.recv().await.unwrap();
            app.handle_event(ev);
        }
    }

    #[tokio::test]
    async fn startup_loads_default_dataset() {
        let mut app = app();
        app.start();
        assert!(app.loading_float.is_some());
        // catalog, dataset, freshness
        settle(&mut app, 3).await;

        assert_eq!(app.dashboard().title(), "Jakarta");
        assert_eq!(app.list_state.selected(), Some(0));
        assert!(app.loading_float.is_none());

        let text = screen(&mut app);
        assert!(text.contains("Nama"));
        assert!(text.contains("http://x"));
        assert!(text.contains("Halaman 1/1"));
    }

    #[tokio::test]
    async fn catalog_failure_shows_banner() {
        let api = Api::new(
            "http://api.test",
            Arc::new(StubFetch::new().failing("http://api.test/list", 500)),
        );
        let mut app = App::new(api, Dashboard::default());
        app.start();
        settle(&mut app, 1).await;
        assert_eq!(app.dashboard().status(), Status::Failed);
        assert!(screen(&mut app).contains("Gagal memuat data"));
    }

    #[tokio::test]
    async fn search_waits_for_debounce() {
        let mut app = app();
        let t = app.dashboard.begin_load(&crate::data::DatasetDescriptor::from_sheet("jkt", "0"));
        app.handle_event(LoadEvent::Dataset(t, Ok(DatasetDocument::parse(DOC.as_bytes()).unwrap())));

        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('/')), now);
        for c in "ani".chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
        app.tick(now + Duration::from_millis(500));
        assert_eq!(app.dashboard().filtered().len(), 2);
        app.tick(now + Duration::from_millis(1000));
        assert_eq!(app.dashboard().filtered(), &[1]);
    }

    #[tokio::test]
    async fn enter_applies_search_immediately() {
        let mut app = app();
        let t = app.dashboard.begin_load(&crate::data::DatasetDescriptor::from_sheet("jkt", "0"));
        app.handle_event(LoadEvent::Dataset(t, Ok(DatasetDocument::parse(DOC.as_bytes()).unwrap())));

        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('/')), now);
        app.handle_key(key(KeyCode::Char('b')), now);
        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.dashboard().filtered(), &[0]);
        assert!(!app.debounce.pending());
        assert!(!app.filter.active());
    }

    #[tokio::test]
    async fn esc_discards_pending_search() {
        let mut app = app();
        let t = app.dashboard.begin_load(&crate::data::DatasetDescriptor::from_sheet("jkt", "0"));
        app.handle_event(LoadEvent::Dataset(t, Ok(DatasetDocument::parse(DOC.as_bytes()).unwrap())));

        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('/')), now);
        app.handle_key(key(KeyCode::Char('b')), now);
        app.handle_key(key(KeyCode::Esc), now);
        assert!(!app.filter.active());
        assert!(!app.debounce.pending());

        app.tick(now + Duration::from_secs(2));
        assert_eq!(app.dashboard().query(), "");
        assert_eq!(app.dashboard().filtered().len(), 2);
    }

    #[tokio::test]
    async fn quit_requires_confirmation() {
        let mut app = app();
        let now = Instant::now();
        assert!(app.handle_key(key(KeyCode::Char('q')), now));
        assert!(app.confirm_quit.is_some());
        assert!(app.handle_key(key(KeyCode::Char('n')), now));
        assert!(app.confirm_quit.is_none());
        app.handle_key(key(KeyCode::Char('q')), now);
        assert!(!app.handle_key(key(KeyCode::Char('y')), now));
    }

    #[tokio::test]
    async fn page_keys_move_between_pages() {
        let mut app = app();
        let mut rows = vec![vec!["No".to_string()]];
        rows.extend((0..25).map(|i| vec![i.to_string()]));
        let doc = DatasetDocument {
            title: "Angka".into(),
            updated_at: None,
            row_data: rows,
        };
        let t = app.dashboard.begin_load(&crate::data::DatasetDescriptor::from_sheet("n", "9"));
        app.handle_event(LoadEvent::Dataset(t, Ok(doc)));
        app.focus = Focus::Table;

        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('j')), now);
        assert_eq!(app.table_scroll, 1);
        app.handle_key(key(KeyCode::Char('l')), now);
        assert_eq!((app.dashboard().paginator().page(), app.table_scroll), (2, 0));
        app.handle_key(key(KeyCode::Char('G')), now);
        assert_eq!(app.dashboard().visible_rows().len(), 5);
        app.handle_key(key(KeyCode::Char('l')), now);
        assert_eq!(app.dashboard().paginator().page(), 3);
        app.handle_key(key(KeyCode::Char('g')), now);
        assert_eq!(app.dashboard().paginator().page(), 1);
    }

    #[tokio::test]
    async fn stale_dataset_event_is_ignored() {
        let mut app = app();
        let a = app.dashboard.begin_load(&crate::data::DatasetDescriptor::from_sheet("a", "1"));
        let b: RequestToken = app.dashboard.begin_load(&crate::data::DatasetDescriptor::from_sheet("b", "2"));
        app.handle_event(LoadEvent::Dataset(b, Ok(DatasetDocument::parse(DOC.as_bytes()).unwrap())));
        app.handle_event(LoadEvent::Dataset(
            a,
            Ok(DatasetDocument::parse(br#"{"title":"Lama","row_data":[]}"#).unwrap()),
        ));
        assert_eq!(app.dashboard().title(), "Jakarta");
    }

    #[tokio::test]
    async fn detail_popup_opens_on_enter() {
        let mut app = app();
        let t = app.dashboard.begin_load(&crate::data::DatasetDescriptor::from_sheet("jkt", "0"));
        app.handle_event(LoadEvent::Dataset(t, Ok(DatasetDocument::parse(DOC.as_bytes()).unwrap())));
        app.focus = Focus::Table;
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('j')), now);
        app.handle_key(key(KeyCode::Enter), now);
        let detail = app.detail_float.as_ref().unwrap();
        assert_eq!(detail.content.lines, vec!["Nama: Ani", "Link: -"]);
        app.handle_key(key(KeyCode::Esc), now);
        assert!(app.detail_float.is_none());
    }
}
