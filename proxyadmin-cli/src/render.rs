//! Text rendering of a table session.
//!
//! Everything drawn here comes from [`DataTable::view`] and
//! [`DataTable::layout`]; the renderer holds no state of its own.

use datagrid::column::Column;
use datagrid::selection::selection_indicator;
use datagrid::table::TableView;
use datagrid::{Alignment, DataTable, GridRow, SortDirection};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table cell may get before it is truncated.
const MAX_CELL_WIDTH: usize = 40;

const COLUMN_GAP: &str = "  ";

/// Page chrome around the table.
#[derive(Debug, Clone, Default)]
pub struct Frame<'a> {
    pub title: &'a str,
    /// Viewport width in pixels.
    pub width: u32,
    /// Labels of the bulk actions the page offers.
    pub actions: Vec<&'a str>,
    /// Outcome of the last bulk action.
    pub notice: Option<String>,
}

fn truncate(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Pads or truncates `text` to exactly `width` display columns.
pub fn fit(text: &str, width: usize, align: Alignment) -> String {
    let text_width = text.width();
    let cell = if text_width <= width {
        text.to_string()
    } else if width == 0 {
        String::new()
    } else {
        let mut cut = truncate(text, width - 1);
        cut.push('…');
        cut
    };

    let pad = width.saturating_sub(cell.width());
    match align {
        Alignment::Left => format!("{}{}", cell, " ".repeat(pad)),
        Alignment::Right => format!("{}{}", " ".repeat(pad), cell),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), cell, " ".repeat(pad - left))
        }
    }
}

fn group_marker(expanded: bool) -> &'static str {
    if expanded { "▼" } else { "▶" }
}

fn header_label<T: GridRow>(table: &DataTable<T>, column: &Column<T>) -> String {
    let sort = &table.state().sort;
    if sort.field.as_deref() == Some(column.id.as_str()) {
        let arrow = match sort.direction {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        };
        format!("{} {}", column.label, arrow)
    } else {
        column.label.clone()
    }
}

fn controls<T: GridRow>(table: &DataTable<T>, lines: &mut Vec<String>) {
    let state = table.state();
    let mut parts = Vec::new();

    if !state.search.is_empty() {
        parts.push(format!("Search: {:?}", state.search));
    }
    for def in table.filter_defs() {
        let value = state
            .filters
            .active_value(&def.id)
            .map(|v| v.as_text())
            .unwrap_or_else(|| "all".to_string());
        parts.push(format!("{}: {}", def.label, value));
    }
    if table.config().group.is_some() {
        let grouping = if table.is_grouping_enabled() { "on" } else { "off" };
        parts.push(format!("Group by domain: {}", grouping));
    }

    if !parts.is_empty() {
        lines.push(parts.join(" | "));
    }
}

fn row_suffix<T: GridRow>(table: &DataTable<T>, row: &T) -> &'static str {
    if table.is_patch_pending(&row.key()) {
        " (saving)"
    } else {
        ""
    }
}

fn grid<T: GridRow>(
    table: &DataTable<T>,
    view: &TableView<'_, T>,
    columns: &[&Column<T>],
    lines: &mut Vec<String>,
) {
    let page = view.page_items();
    let widths: Vec<usize> = columns
        .iter()
        .map(|column| {
            let content = page.iter().map(|row| column.display(row).width());
            content
                .chain(std::iter::once(header_label(table, column).width()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let render_row = |row: &T| -> String {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| fit(&column.display(row), *width, column.align))
            .collect();
        let selected = table.is_selected(&row.key());
        format!(
            "{} {}{}",
            selection_indicator(selected),
            cells.join(COLUMN_GAP).trim_end(),
            row_suffix(table, row)
        )
    };

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| fit(&header_label(table, column), *width, column.align))
        .collect();
    lines.push(format!(
        "{} {}",
        table.page_selection_status().indicator(),
        header.join(COLUMN_GAP).trim_end()
    ));
    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1) + 2;
    lines.push("─".repeat(rule_width));

    if view.is_grouped() {
        for section in view.page_sections() {
            lines.push(format!(
                "{} {}",
                group_marker(section.group.is_expanded),
                section.group.label
            ));
            for &row in section.items {
                lines.push(render_row(row));
            }
        }
    } else {
        for &row in page {
            lines.push(render_row(row));
        }
    }
}

fn cards<T: GridRow>(
    table: &DataTable<T>,
    view: &TableView<'_, T>,
    columns: &[&Column<T>],
    lines: &mut Vec<String>,
) {
    let render_card = |row: &T, lines: &mut Vec<String>| {
        let selected = table.is_selected(&row.key());
        let mut fields = columns.iter();
        let title = fields.next().map(|c| c.display(row)).unwrap_or_default();
        lines.push(format!(
            "{} {}{}",
            selection_indicator(selected),
            title,
            row_suffix(table, row)
        ));
        for column in fields {
            lines.push(format!("    {}: {}", column.label, column.display(row)));
        }
    };

    if view.is_grouped() {
        for section in view.page_sections() {
            lines.push(format!(
                "{} {}",
                group_marker(section.group.is_expanded),
                section.group.label
            ));
            for &row in section.items {
                render_card(row, lines);
            }
        }
    } else {
        for &row in view.page_items() {
            render_card(row, lines);
        }
    }
}

fn footer<T: GridRow>(table: &DataTable<T>, view: &TableView<'_, T>, frame: &Frame<'_>, lines: &mut Vec<String>) {
    let page = &view.page;
    let sizes: Vec<String> = table
        .page_size_options()
        .iter()
        .map(|size| {
            if *size == page.page_size {
                format!("[{}]", size)
            } else {
                size.to_string()
            }
        })
        .collect();
    lines.push(format!(
        "{} | page {} of {} | per page: {}",
        page.status_text(),
        page.page_index.saturating_add(1),
        page.page_count.max(1),
        sizes.join(" ")
    ));

    let selected = table.selected_count();
    if selected > 0 {
        let mut bar = format!("{} selected", selected);
        if !frame.actions.is_empty() {
            bar.push_str(": ");
            bar.push_str(&frame.actions.join(" / "));
        }
        lines.push(bar);
    }
}

/// Renders the table session as text.
pub fn render<T: GridRow>(table: &DataTable<T>, frame: &Frame<'_>) -> String {
    let mode = table.mode_for_width(frame.width);
    let layout = table.layout(mode);
    let view = table.view();
    let mut lines = Vec::new();

    lines.push(format!("{} ({} view)", frame.title, mode.as_str()));
    controls(table, &mut lines);

    if let Some(notice) = &frame.notice {
        lines.push(notice.clone());
    }
    if let Some(error) = table.error() {
        lines.push(format!("Error: {}", error));
    }
    if table.is_loading() {
        lines.push("Loading…".to_string());
    }

    if view.rows.is_empty() {
        let empty = if table.items().is_empty() {
            "Nothing here yet."
        } else {
            "No records match the current search and filters."
        };
        lines.push(empty.to_string());
    } else if layout.use_cards {
        cards(table, &view, &layout.columns, &mut lines);
    } else {
        grid(table, &view, &layout.columns, &mut lines);
    }

    footer(table, &view, frame, &mut lines);
    lines.join("\n")
}
