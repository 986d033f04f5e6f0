use crate::{
    float::{FloatContent, dim_background},
    hint::Shortcut,
    theme::Theme,
};
use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Dialog konfirmasi keluar. Pilihan awal "Tidak" supaya Enter tidak
/// langsung menutup aplikasi.
pub struct ConfirmQuit {
    /// Ada request yang belum selesai saat dialog dibuka.
    loading: bool,
    yes_selected: bool,
    finished: bool,
    confirmed: bool,
}

impl ConfirmQuit {
    pub fn new(loading: bool) -> Self {
        Self {
            loading,
            yes_selected: false,
            finished: false,
            confirmed: false,
        }
    }

    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    fn finish(&mut self, confirmed: bool) {
        self.confirmed = confirmed;
        self.finished = true;
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let button = |label: &'static str, selected: bool| {
            let style = if selected {
                Style::default()
                    .fg(theme.selection_fg())
                    .bg(theme.selection_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.muted_color())
            };
            Span::styled(label, style)
        };

        let mut lines = vec![Line::from("Yakin ingin keluar?")];
        if self.loading {
            lines.push(Line::styled(
                "Data masih dimuat.",
                Style::default().fg(theme.muted_color()),
            ));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            button(" [y] Ya ", self.yes_selected),
            Span::raw("    "),
            button(" [n] Tidak ", !self.yes_selected),
        ]));
        lines
    }
}

impl FloatContent for ConfirmQuit {
    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        dim_background(frame, area, theme);

        let block = Block::default()
            .title(" Keluar ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_color()));

        frame.render_widget(
            Paragraph::new(self.lines(theme))
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }

    fn handle_key_event(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.finish(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.finish(false),
            KeyCode::Enter => self.finish(self.yes_selected),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.yes_selected = !self.yes_selected;
            }
            _ => {}
        }
        self.finished
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn get_shortcut_list(&self) -> (&str, Box<[Shortcut]>) {
        (
            "Konfirmasi Keluar",
            crate::shortcuts!(
                ("Keluar", ["y"]),
                ("Batal", ["n", "Esc"]),
                ("Pilih", ["←", "→"]),
                ("OK", ["Enter"]),
            ),
        )
    }
}
