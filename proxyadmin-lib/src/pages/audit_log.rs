//! Audit log page

use chrono::NaiveDate;
use datagrid::filter::{FilterDef, FilterKind, FilterMode, FilterState, FilterValue};
use datagrid::{CellValue, Column, Priority, SortState, TableConfig};

use super::common::format_date;
use crate::model::AuditLogEntry;

pub const NAME: &str = "audit_log";

/// Date bound format for the `date_from` and `date_to` filters.
pub const DATE_FILTER_FORMAT: &str = "%Y-%m-%d";

const OBJECT_TYPES: [(&str, &str); 8] = [
    ("proxy-host", "Proxy Host"),
    ("redirection-host", "Redirection Host"),
    ("dead-host", "404 Host"),
    ("stream", "Stream"),
    ("access-list", "Access List"),
    ("certificate", "Certificate"),
    ("user", "User"),
    ("setting", "Setting"),
];

const ACTIONS: [(&str, &str); 5] = [
    ("created", "Created"),
    ("updated", "Updated"),
    ("deleted", "Deleted"),
    ("enabled", "Enabled"),
    ("disabled", "Disabled"),
];

fn object_type_label(object_type: &str) -> String {
    OBJECT_TYPES
        .iter()
        .find(|(id, _)| *id == object_type)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| object_type.to_string())
}

pub fn columns() -> Vec<Column<AuditLogEntry>> {
    vec![
        Column::new("date", "Date", |e: &AuditLogEntry| CellValue::from(e.created_on))
            .sortable()
            .priority(Priority::P1)
            .render(|e: &AuditLogEntry| format_date(&e.created_on)),
        Column::new("user", "User", |e: &AuditLogEntry| CellValue::from(e.user_label()))
            .sortable()
            .priority(Priority::P2),
        Column::new("object_type", "Object", |e: &AuditLogEntry| {
            CellValue::from(e.object_type.as_str())
        })
        .sortable()
        .priority(Priority::P2)
        .render(|e: &AuditLogEntry| object_type_label(&e.object_type)),
        Column::new("action", "Action", |e: &AuditLogEntry| CellValue::from(e.action.as_str()))
            .sortable()
            .priority(Priority::P1),
    ]
}

pub fn filters() -> Vec<FilterDef> {
    let object_type = OBJECT_TYPES.iter().fold(
        FilterDef::new("object_type", "Object").option("all", "All"),
        |def, (id, label)| def.option(*id, *label),
    );
    let action = ACTIONS.iter().fold(
        FilterDef::new("action", "Action").option("all", "All"),
        |def, (id, label)| def.option(*id, *label),
    );
    vec![
        object_type.default_value("all"),
        action.default_value("all"),
        FilterDef::new("date_from", "From").kind(FilterKind::Date),
        FilterDef::new("date_to", "To").kind(FilterKind::Date),
    ]
}

fn parse_date(value: &FilterValue) -> Option<NaiveDate> {
    let raw = value.as_text();
    match NaiveDate::parse_from_str(raw.trim(), DATE_FILTER_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("Ignoring date bound {:?}: {}", raw, e);
            None
        }
    }
}

/// Whether an entry passes every active audit log filter.
///
/// Date bounds are inclusive and compare the entry's UTC calendar date.
/// Unparseable bounds are ignored.
pub fn matches(entry: &AuditLogEntry, filters: &FilterState) -> bool {
    if let Some(object_type) = filters.active_value("object_type")
        && object_type.as_text() != entry.object_type
    {
        return false;
    }
    if let Some(action) = filters.active_value("action")
        && action.as_text() != entry.action
    {
        return false;
    }

    let date = entry.created_on.date_naive();
    if let Some(from) = filters.active_value("date_from").and_then(parse_date)
        && date < from
    {
        return false;
    }
    if let Some(to) = filters.active_value("date_to").and_then(parse_date)
        && date > to
    {
        return false;
    }
    true
}

pub fn filter_mode() -> FilterMode<AuditLogEntry> {
    FilterMode::custom(matches)
}

pub fn table_config() -> TableConfig<AuditLogEntry> {
    TableConfig::new(NAME)
        .with_columns(columns())
        .with_filters(filters())
        .with_filter_mode(filter_mode())
        .with_default_sort(SortState::desc("date"))
}
