use crate::{
    data::Table,
    float::{FloatContent, dim_background},
    hint::Shortcut,
    render::{CellKind, PLACEHOLDER, classify},
    theme::Theme,
};
use ratatui::{Frame, layout::Rect};

/// Popup berisi satu baris lengkap, satu kolom per baris teks.
pub struct RowDetail {
    pub lines: Vec<String>,
    scroll: u16,
    finished: bool,
}

impl RowDetail {
    pub fn new(table: &Table, row: &[String]) -> Self {
        let lines = row
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let shown = match classify(value) {
                    CellKind::Link(url) => format!("{url} (link)"),
                    CellKind::Text(text) => text.to_string(),
                    CellKind::Empty => PLACEHOLDER.to_string(),
                };
                format!("{}: {}", table.label(i), shown)
            })
            .collect();
        Self {
            lines,
            scroll: 0,
            finished: false,
        }
    }
}

impl FloatContent for RowDetail {
    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        use ratatui::{
            layout::Alignment,
            style::Style,
            widgets::{Block, Borders, Paragraph, Wrap},
        };

        dim_background(frame, area, theme);

        let text = Paragraph::new(self.lines.join("\n"))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Detail ")
                    .border_type(ratatui::widgets::BorderType::Rounded),
            )
            .style(Style::default().fg(theme.info_color()))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(text, area);
    }

    fn handle_key_event(&mut self, key: &ratatui::crossterm::event::KeyEvent) -> bool {
        use ratatui::crossterm::event::KeyCode::*;
        match key.code {
            Char('q') | Esc => {
                self.finished = true;
                true
            }
            Down | Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
                false
            }
            Up | Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                false
            }
            _ => false,
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn get_shortcut_list(&self) -> (&str, Box<[Shortcut]>) {
        (
            "Detail",
            crate::shortcuts!(("Gulir", ["j", "k"]), ("Tutup", ["q", "Esc"])),
        )
    }
}
