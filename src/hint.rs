use ratatui::{
    style::{Style, Stylize},
    text::{Line, Span},
};

pub struct Shortcut {
    pub key_sequences: Vec<Span<'static>>,
    pub desc: &'static str,
}

#[macro_export]
macro_rules! shortcuts {
    ($(($name:literal,[$($key:literal),+ $(,)?])),* $(,)?) => {
        vec![
            $(
                $crate::hint::Shortcut::new($name, [$($key),*])
            ),*
        ].into_boxed_slice()
    };
}

fn add_spacing(list: Vec<Vec<Span>>) -> Line {
    list.into_iter()
        .flat_map(|mut s| {
            s.push(Span::raw("    "));
            s
        })
        .collect()
}

/// Susun shortcut ke beberapa baris supaya muat di lebar `width`.
pub fn create_shortcut_list(shortcuts: Box<[Shortcut]>, width: u16) -> Box<[Line<'static>]> {
    let hints = shortcuts
        .iter()
        .map(|h| h.to_spans())
        .collect::<Vec<_>>();

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Vec<Span<'static>>> = Vec::new();
    let mut current_width = 0usize;

    for hint in hints {
        let hint_width: usize = hint.iter().map(|s| s.width()).sum::<usize>() + 4;
        if !current.is_empty() && current_width + hint_width > width.saturating_sub(2) as usize {
            lines.push(add_spacing(std::mem::take(&mut current)));
            current_width = 0;
        }
        current_width += hint_width;
        current.push(hint);
    }
    if !current.is_empty() {
        lines.push(add_spacing(current));
    }

    lines.into_boxed_slice()
}

impl Shortcut {
    pub fn new<const N: usize>(desc: &'static str, key_sequences: [&'static str; N]) -> Self {
        Self {
            key_sequences: key_sequences
                .iter()
                .map(|s| Span::styled(*s, Style::default().bold()))
                .collect(),
            desc,
        }
    }

    fn to_spans(&self) -> Vec<Span<'static>> {
        let mut ret: Vec<_> = self
            .key_sequences
            .iter()
            .flat_map(|seq| [Span::raw("["), seq.clone(), Span::raw("] ")])
            .collect();
        ret.push(Span::styled(self.desc, Style::default().italic()));
        ret
    }
}
