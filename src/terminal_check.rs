use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Wrap},
};

/// Minimum dimensions for the terminal window.
pub const MIN_WIDTH: u16 = 80;
pub const MIN_HEIGHT: u16 = 24;

/// Check if the terminal is too small.
pub fn is_too_small(area: Rect) -> bool {
    area.width < MIN_WIDTH || area.height < MIN_HEIGHT
}

/// Draw a centered warning message when the terminal is too small.
pub fn draw_too_small_warning(f: &mut Frame, area: Rect) {
    let warning = Paragraph::new(format!(
        "Terminal terlalu kecil!\n\nSekarang: {}x{}\nMinimal: {}x{}\n\nSilakan perbesar jendela.",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    .wrap(Wrap { trim: true });

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Fill(1),
        ])
        .split(area);

    f.render_widget(warning, layout[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_small_terminals() {
        assert!(is_too_small(Rect::new(0, 0, 79, 40)));
        assert!(is_too_small(Rect::new(0, 0, 120, 10)));
        assert!(!is_too_small(Rect::new(0, 0, 80, 24)));
    }
}
