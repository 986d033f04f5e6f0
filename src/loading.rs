use crate::{
    float::{FloatContent, dim_background},
    hint::Shortcut,
    theme::Theme,
};
use ratatui::{Frame, layout::Rect};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// Indikator loading selama fetch catalog/dataset berjalan.
pub struct LoadingFloat {
    message: String,
    tick: usize,
}

impl LoadingFloat {
    pub fn new(msg: &str) -> Self {
        Self {
            message: msg.to_string(),
            tick: 0,
        }
    }

    fn frame_text(&self) -> String {
        format!("{} {}", SPINNER[self.tick % SPINNER.len()], self.message)
    }
}

impl FloatContent for LoadingFloat {
    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        use ratatui::{
            layout::Alignment,
            style::{Modifier, Style},
            widgets::{Block, BorderType, Borders, Paragraph},
        };

        dim_background(frame, area, theme);

        let block = Block::default()
            .title(" Memuat ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border_color()));

        let p = Paragraph::new(self.frame_text())
            .block(block)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.info_color())
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(p, area);
        self.tick = self.tick.wrapping_add(1);
    }

    fn handle_key_event(&mut self, _key: &ratatui::crossterm::event::KeyEvent) -> bool {
        false
    }

    fn is_finished(&self) -> bool {
        false
    }

    fn get_shortcut_list(&self) -> (&str, Box<[Shortcut]>) {
        ("Memuat", crate::shortcuts!(("Keluar", ["q"]),))
    }
}
