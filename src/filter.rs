use ratatui::{
    prelude::*,
    symbols::border,
    widgets::{Block, Paragraph},
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthChar;

/// Jeda tanpa ketikan sebelum query diterapkan.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Actions triggered by search bar input
pub enum SearchAction {
    None,
    Exit,
    Commit,
    Update,
}

/// True kalau salah satu sel mengandung `needle` (sudah lowercase).
fn row_matches(row: &[String], needle: &str) -> bool {
    row.iter().any(|cell| cell.to_lowercase().contains(needle))
}

/// Indeks baris yang cocok dengan query, urutan dipertahankan.
/// Query kosong mengembalikan semua baris.
pub fn filter_rows(rows: &[Vec<String>], query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| needle.is_empty() || row_matches(row, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// Satu timer tertunda: setiap `schedule` membatalkan jadwal sebelumnya.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true once when the deadline has passed, then clears it.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

#[derive(Default)]
pub struct Filter {
    in_search: bool,
    input: Vec<char>,
    cursor: usize,
}

impl Filter {
    pub fn activate(&mut self) {
        self.in_search = true;
    }
    pub fn deactivate(&mut self) {
        self.in_search = false;
    }
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
    pub fn term(&self) -> String {
        self.input.iter().collect()
    }
    pub fn active(&self) -> bool {
        self.in_search
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let hint = if self.in_search || !self.input.is_empty() {
            self.term()
        } else {
            "Tekan / untuk mencari".into()
        };
        let p = Paragraph::new(hint).block(
            Block::bordered()
                .title(" Cari ")
                .border_set(border::ROUNDED)
                .border_type(ratatui::widgets::BorderType::Rounded),
        );
        frame.render_widget(p, area);

        if self.in_search {
            let w: u16 = self
                .input
                .iter()
                .take(self.cursor)
                .map(|c| c.width().unwrap_or(1) as u16)
                .sum();
            frame.set_cursor_position(Position::new(area.x + 1 + w, area.y + 1));
        }
    }

    pub fn handle_key(&mut self, key: &ratatui::crossterm::event::KeyEvent) -> SearchAction {
        use ratatui::crossterm::event::{KeyCode, KeyModifiers};
        match key.code {
            KeyCode::Enter => return SearchAction::Commit,
            KeyCode::Esc => return SearchAction::Exit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                return SearchAction::Commit;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.input.remove(self.cursor);
                }
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                return SearchAction::None;
            }
            KeyCode::Right => {
                if self.cursor < self.input.len() {
                    self.cursor += 1;
                }
                return SearchAction::None;
            }
            KeyCode::Char(ch) => {
                self.input.insert(self.cursor, ch);
                self.cursor += 1;
            }
            _ => return SearchAction::None,
        }
        SearchAction::Update
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyEvent};

    fn rows() -> Vec<Vec<String>> {
        [
            ["Budi", "Jakarta Barat", "http://x"],
            ["Ani", "Bandung", ""],
            ["Citra", "JAKARTA Timur", "0812"],
        ]
        .iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
    }

    #[test]
    fn empty_query_keeps_every_row_in_order() {
        assert_eq!(filter_rows(&rows(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn matches_any_cell_case_insensitively() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, "jakarta"), vec![0, 2]);
        assert_eq!(filter_rows(&rows, "BANDUNG"), vec![1]);
        assert!(filter_rows(&rows, "surabaya").is_empty());
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let rows = rows();
        let once: Vec<Vec<String>> = filter_rows(&rows, "a")
            .into_iter()
            .map(|i| rows[i].clone())
            .collect();
        let twice = filter_rows(&once, "a");
        assert_eq!(twice, (0..once.len()).collect::<Vec<_>>());
    }

    #[test]
    fn debounce_fires_only_after_quiet_period() {
        let start = Instant::now();
        let mut d = Debounce::default();
        assert!(!d.fire(start));

        d.schedule(start);
        d.schedule(start + Duration::from_millis(600));
        // ketikan kedua menggeser deadline
        assert!(!d.fire(start + Duration::from_millis(1200)));
        assert!(d.fire(start + Duration::from_millis(1600)));
        assert!(!d.fire(start + Duration::from_millis(3000)));
    }

    #[test]
    fn debounce_cancel_drops_pending_deadline() {
        let start = Instant::now();
        let mut d = Debounce::new(Duration::from_millis(10));
        d.schedule(start);
        assert!(d.pending());
        d.cancel();
        assert!(!d.fire(start + Duration::from_secs(1)));
    }

    #[test]
    fn typing_edits_at_cursor() {
        let mut f = Filter::default();
        f.activate();
        for c in "bdi".chars() {
            f.handle_key(&KeyEvent::from(KeyCode::Char(c)));
        }
        f.handle_key(&KeyEvent::from(KeyCode::Left));
        f.handle_key(&KeyEvent::from(KeyCode::Left));
        assert!(matches!(
            f.handle_key(&KeyEvent::from(KeyCode::Char('u'))),
            SearchAction::Update
        ));
        assert_eq!(f.term(), "budi");
        assert!(matches!(
            f.handle_key(&KeyEvent::from(KeyCode::Enter)),
            SearchAction::Commit
        ));
    }
}
