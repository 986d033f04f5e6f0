//! HTML rendering of the table state, plus the per-cell rule shared with the TUI.

use crate::{data::Table, paginator::Paginator};
use html_escape::{encode_double_quoted_attribute, encode_text};
use itertools::Itertools;

pub const PLACEHOLDER: &str = "-";
pub const ERROR_BANNER: &str = "Gagal memuat data. Silakan coba beberapa saat lagi.";

/// Cara menampilkan satu sel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind<'a> {
    Link(&'a str),
    Text(&'a str),
    Empty,
}

pub fn classify(value: &str) -> CellKind<'_> {
    if value.contains("http") {
        CellKind::Link(value)
    } else if value.is_empty() {
        CellKind::Empty
    } else {
        CellKind::Text(value)
    }
}

pub fn render_cell(value: &str, label: &str) -> String {
    let label = encode_double_quoted_attribute(label);
    match classify(value) {
        CellKind::Link(href) => format!(
            r#"<td data-label="{label}"><a href="{}" target="_blank">link</a></td>"#,
            encode_double_quoted_attribute(href)
        ),
        CellKind::Text(text) => format!(r#"<td data-label="{label}">{}</td>"#, encode_text(text)),
        CellKind::Empty => format!(r#"<td data-label="{label}">{PLACEHOLDER}</td>"#),
    }
}

pub fn render_header(headers: &[String]) -> String {
    headers
        .iter()
        .map(|h| format!("<th>{}</th>", encode_text(h)))
        .join("")
}

pub fn render_row(table: &Table, row: &[String]) -> String {
    let cells = row
        .iter()
        .enumerate()
        .map(|(i, v)| render_cell(v, table.label(i)))
        .join("");
    format!("<tr>{cells}</tr>")
}

/// `<tbody>` content for the given row indices of `table`.
pub fn render_body(table: &Table, indices: &[usize]) -> String {
    indices
        .iter()
        .filter_map(|&i| table.rows.get(i))
        .map(|row| render_row(table, row))
        .join("\n")
}

/// Everything a full page needs; borrowed from the dashboard.
pub struct PageView<'a> {
    pub title: &'a str,
    pub updated: Option<String>,
    pub table: &'a Table,
    pub rows: &'a [usize],
    pub paginator: Option<Paginator>,
    pub failed: bool,
    /// Inline stylesheet; falls back to linking the CDN copy.
    pub stylesheet: Option<String>,
}

fn pagination_controls(p: &Paginator) -> String {
    let button = |label: &str, enabled: bool| {
        if enabled {
            format!(r#"<button class="button">{label}</button>"#)
        } else {
            format!(r#"<button class="button" disabled>{label}</button>"#)
        }
    };
    format!(
        r#"<nav class="pagination">{}{}<span>Halaman {} dari {}</span>{}{}</nav>"#,
        button("Pertama", p.has_previous()),
        button("Sebelumnya", p.has_previous()),
        p.page(),
        p.total(),
        button("Selanjutnya", p.has_next()),
        button("Terakhir", p.has_next()),
    )
}

pub fn render_page(view: &PageView) -> String {
    let style = match &view.stylesheet {
        Some(css) => format!("<style>{css}</style>"),
        None => format!(r#"<link rel="stylesheet" href="{}">"#, crate::cache::BULMA_CSS),
    };

    let content = if view.failed {
        format!(
            r#"<div class="notification is-danger">{}</div>"#,
            encode_text(ERROR_BANNER)
        )
    } else {
        let updated = view
            .updated
            .as_deref()
            .map(|u| format!(r#"<p class="updated">Diperbarui {}</p>"#, encode_text(u)))
            .unwrap_or_default();
        let controls = view
            .paginator
            .as_ref()
            .map(pagination_controls)
            .unwrap_or_default();
        format!(
            "<h1 class=\"title\">{title}</h1>\n{updated}\n<table class=\"table\">\n<thead><tr>{head}</tr></thead>\n<tbody>\n{body}\n</tbody>\n</table>\n{controls}",
            title = encode_text(view.title),
            head = render_header(&view.table.headers),
            body = render_body(view.table, view.rows),
        )
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{style}\n</head>\n<body>\n<section class=\"section\">\n{content}\n</section>\n</body>\n</html>\n",
        encode_text(view.title)
    )
}
