use ratatui::style::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Default,
    /// Tanpa warna, dipakai kalau `NO_COLOR` diset.
    Mono,
}

impl Theme {
    pub fn detect() -> Self {
        match std::env::var_os("NO_COLOR") {
            Some(v) if !v.is_empty() => Theme::Mono,
            _ => Theme::Default,
        }
    }

    const fn pick(&self, color: Color, mono: Color) -> Color {
        match self {
            Theme::Default => color,
            Theme::Mono => mono,
        }
    }

    pub const fn title_color(&self) -> Color {
        self.pick(Color::Yellow, Color::Reset)
    }
    pub const fn menu_color(&self) -> Color {
        self.pick(Color::Cyan, Color::Reset)
    }
    pub const fn muted_color(&self) -> Color {
        self.pick(Color::DarkGray, Color::DarkGray)
    }
    pub const fn table_header(&self) -> Color {
        self.pick(Color::Black, Color::Black)
    }
    pub const fn link_color(&self) -> Color {
        self.pick(Color::LightCyan, Color::Reset)
    }
    pub const fn selection_bg(&self) -> Color {
        self.pick(Color::Blue, Color::White)
    }
    pub const fn selection_fg(&self) -> Color {
        self.pick(Color::Black, Color::Black)
    }
    pub const fn focused_color(&self) -> Color {
        self.pick(Color::LightBlue, Color::White)
    }
    pub const fn unfocused_color(&self) -> Color {
        self.pick(Color::Gray, Color::DarkGray)
    }
    pub const fn table_row_even(&self) -> Color {
        self.pick(Color::Rgb(40, 44, 52), Color::Reset)
    }
    pub const fn table_row_odd(&self) -> Color {
        self.pick(Color::Rgb(30, 34, 40), Color::Reset)
    }
    pub const fn info_color(&self) -> Color {
        self.pick(Color::LightGreen, Color::Reset)
    }
    pub const fn error_bg(&self) -> Color {
        self.pick(Color::Red, Color::Black)
    }
    pub const fn border_color(&self) -> Color {
        self.pick(Color::LightBlue, Color::Gray)
    }
    pub const fn overlay_bg(&self) -> Color {
        self.pick(Color::Rgb(15, 17, 21), Color::Reset)
    }
}
