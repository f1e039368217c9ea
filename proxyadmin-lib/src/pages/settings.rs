//! Settings page

use datagrid::filter::FilterDef;
use datagrid::{CardBreakpoint, CellValue, Column, Priority, TableConfig};

use crate::model::Setting;

pub const NAME: &str = "settings";

pub fn columns() -> Vec<Column<Setting>> {
    vec![
        Column::new("id", "Id", |s: &Setting| CellValue::from(s.id.as_str())).priority(Priority::P3),
        Column::new("name", "Name", |s: &Setting| CellValue::from(s.name.as_str()))
            .sortable()
            .priority(Priority::P1)
            .render(|s: &Setting| {
                if s.description.is_empty() {
                    s.name.clone()
                } else {
                    format!("{}: {}", s.name, s.description)
                }
            }),
        Column::new("value", "Value", |s: &Setting| CellValue::from(s.value_text()))
            .priority(Priority::P1),
    ]
}

/// Settings have no filter controls.
pub fn filters() -> Vec<FilterDef> {
    Vec::new()
}

/// Settings stay a table at every width.
pub fn table_config() -> TableConfig<Setting> {
    TableConfig::new(NAME)
        .with_columns(columns())
        .with_filters(filters())
        .with_card_breakpoint(CardBreakpoint::Never)
}
