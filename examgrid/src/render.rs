//! Plain-text rendering of a [`GridView`].

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::column::Alignment;
use crate::selection::HeaderCheckbox;
use crate::sort::Direction;
use crate::view::{EmptyView, GridView, SkeletonView, TableView};

/// Widest a column grows when its width is computed from content.
pub const MAX_AUTO_WIDTH: usize = 40;

const SKELETON_CELL_WIDTH: usize = 8;
const SEPARATOR: &str = " | ";

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Truncate or pad `s` to exactly `width` display columns.
pub fn fit(s: &str, width: usize, align: Alignment) -> String {
    let text = truncate_to_width(s, width);
    let gap = width.saturating_sub(display_width(&text));
    let (left, right) = match align {
        Alignment::Start => (0, gap),
        Alignment::Center => (gap / 2, gap - gap / 2),
        Alignment::End => (gap, 0),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

pub fn checkbox(state: HeaderCheckbox) -> &'static str {
    match state {
        HeaderCheckbox::None => "[ ]",
        HeaderCheckbox::Some => "[-]",
        HeaderCheckbox::All => "[x]",
    }
}

fn row_checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn sort_indicator(direction: Option<Direction>) -> &'static str {
    match direction {
        Some(Direction::Asc) => " ▲",
        Some(Direction::Desc) => " ▼",
        None => "",
    }
}

/// Render any view to text, one line per row.
pub fn render_text(view: &GridView) -> String {
    match view {
        GridView::Skeleton(skeleton) => render_skeleton(skeleton),
        GridView::Empty(empty) => render_empty(empty),
        GridView::Table(table) => render_table(table),
    }
}

fn render_skeleton(view: &SkeletonView) -> String {
    let cell = "░".repeat(SKELETON_CELL_WIDTH);
    let line = vec![cell.as_str(); view.columns].join(SEPARATOR);
    vec![line; view.rows].join("\n")
}

fn render_empty(view: &EmptyView) -> String {
    let mut lines = Vec::new();
    if let Some(icon) = &view.icon {
        lines.push(icon.clone());
    }
    lines.push(view.message.clone());
    if let Some(action) = &view.action {
        lines.push(format!("[ {action} ]"));
    }
    lines.join("\n")
}

fn render_table(view: &TableView) -> String {
    let labels: Vec<String> = view
        .header
        .iter()
        .map(|h| format!("{}{}", h.label, sort_indicator(h.sort)))
        .collect();

    let widths: Vec<usize> = view
        .header
        .iter()
        .enumerate()
        .map(|(i, h)| match h.width {
            Some(w) => usize::from(w),
            None => view
                .rows
                .iter()
                .filter_map(|r| r.cells.get(i))
                .map(|c| display_width(c))
                .chain(std::iter::once(display_width(&labels[i])))
                .max()
                .unwrap_or(0)
                .min(MAX_AUTO_WIDTH),
        })
        .collect();

    let mut lines = Vec::with_capacity(view.rows.len() + 3);

    let mut header: Vec<String> = Vec::new();
    if let Some(state) = view.header_checkbox {
        header.push(checkbox(state).to_string());
    }
    for ((label, h), width) in labels.iter().zip(&view.header).zip(&widths) {
        header.push(fit(label, *width, h.align));
    }
    lines.push(header.join(SEPARATOR).trim_end().to_string());

    let mut rule: Vec<String> = Vec::new();
    if view.header_checkbox.is_some() {
        rule.push("-".repeat(3));
    }
    rule.extend(widths.iter().map(|w| "-".repeat(*w)));
    lines.push(rule.join("-+-"));

    for row in &view.rows {
        let mut cells: Vec<String> = Vec::new();
        if view.header_checkbox.is_some() {
            cells.push(row_checkbox(row.selected).to_string());
        }
        for ((cell, h), width) in row.cells.iter().zip(&view.header).zip(&widths) {
            cells.push(fit(cell, *width, h.align));
        }
        lines.push(cells.join(SEPARATOR).trim_end().to_string());
    }

    if let Some(page) = &view.footer {
        let mut footer = format!(
            "Page {} of {} · rows {}-{} of {}",
            page.current_page, page.total_pages, page.range_start, page.range_end, page.total_rows
        );
        if view.header_checkbox.is_some() {
            footer.push_str(&format!(" · {} selected", view.selected_count));
        }
        lines.push(footer);
    }

    lines.join("\n")
}
