use crate::{hint::Shortcut, theme::Theme};
use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent},
    layout::Rect,
    style::Style,
    widgets::{Block, Clear},
};

pub trait FloatContent {
    fn draw(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
    fn handle_key_event(&mut self, key: &KeyEvent) -> bool;
    fn is_finished(&self) -> bool;
    fn get_shortcut_list(&self) -> (&str, Box<[Shortcut]>);
}

#[derive(Debug, Clone, Copy)]
pub enum FloatMode {
    /// Ukuran relatif terhadap layar (persen)
    Percent(u16, u16),
    /// Ukuran tetap dalam satuan karakter
    Absolute(u16, u16),
}

pub struct Float<Content: FloatContent + ?Sized> {
    pub content: Box<Content>,
    mode: FloatMode,
}

/// Redupkan layar di belakang popup lalu kosongkan area popup.
pub fn dim_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay = Block::default().style(Style::default().bg(theme.overlay_bg()));
    frame.render_widget(overlay, frame.area());
    frame.render_widget(Clear, area);
}

impl<Content: FloatContent + ?Sized> Float<Content> {
    /// Popup dengan ukuran persen dari layar.
    pub fn new(content: Box<Content>, width_percent: u16, height_percent: u16) -> Self {
        Self {
            content,
            mode: FloatMode::Percent(width_percent, height_percent),
        }
    }

    pub fn new_absolute(content: Box<Content>, width: u16, height: u16) -> Self {
        Self {
            content,
            mode: FloatMode::Absolute(width, height),
        }
    }

    /// Area popup di tengah `area`, tidak pernah lebih besar dari `area`.
    fn floating_window(&self, area: Rect) -> Rect {
        let (w, h) = match self.mode {
            FloatMode::Percent(wp, hp) => (
                (u32::from(area.width) * u32::from(wp.min(100)) / 100) as u16,
                (u32::from(area.height) * u32::from(hp.min(100)) / 100) as u16,
            ),
            FloatMode::Absolute(w, h) => (w, h),
        };
        let w = w.min(area.width);
        let h = h.min(area.height);
        Rect::new(
            area.x + (area.width - w) / 2,
            area.y + (area.height - h) / 2,
            w,
            h,
        )
    }

    pub fn draw(&mut self, frame: &mut Frame, parent_area: Rect, theme: &Theme) {
        let popup_area = self.floating_window(parent_area);
        self.content.draw(frame, popup_area, theme);
    }

    /// true kalau popup sudah selesai dan boleh ditutup.
    pub fn handle_key_event(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') | KeyCode::Esc if self.content.is_finished() => {
                true
            }
            _ => self.content.handle_key_event(key),
        }
    }

    pub fn get_shortcut_list(&self) -> (&str, Box<[Shortcut]>) {
        self.content.get_shortcut_list()
    }
}
