//! Access lists page

use datagrid::filter::{FilterDef, SearchConfig};
use datagrid::{Alignment, CellValue, Column, Priority, SortState, TableConfig};

use crate::model::AccessList;

pub const NAME: &str = "access_lists";

pub fn columns() -> Vec<Column<AccessList>> {
    vec![
        Column::new("name", "Name", |l: &AccessList| CellValue::from(l.name.as_str()))
            .sortable()
            .priority(Priority::P1),
        Column::new("authorization", "Authorization", |l: &AccessList| {
            CellValue::from(l.items.len() as i64)
        })
        .sortable()
        .priority(Priority::P2)
        .render(|l: &AccessList| match l.items.len() {
            1 => "1 user".to_string(),
            n => format!("{} users", n),
        }),
        Column::new("access", "Access", |l: &AccessList| CellValue::from(l.clients.len() as i64))
            .sortable()
            .priority(Priority::P3)
            .render(|l: &AccessList| match l.clients.len() {
                1 => "1 rule".to_string(),
                n => format!("{} rules", n),
            }),
        Column::new("satisfy", "Satisfy", |l: &AccessList| CellValue::from(l.satisfy_label()))
            .priority(Priority::P3),
        Column::new("proxy_hosts", "Proxy Hosts", |l: &AccessList| {
            CellValue::from(l.proxy_host_count)
        })
        .sortable()
        .priority(Priority::P2)
        .align(Alignment::Right),
    ]
}

/// Access lists have no filter controls.
pub fn filters() -> Vec<FilterDef> {
    Vec::new()
}

/// Column search extended into usernames and client addresses.
pub fn search() -> SearchConfig<AccessList> {
    SearchConfig::new().extension(|list: &AccessList, query: &str| list.nested_contains(query))
}

pub fn table_config() -> TableConfig<AccessList> {
    TableConfig::new(NAME)
        .with_columns(columns())
        .with_filters(filters())
        .with_search(search())
        .with_default_sort(SortState::asc("name"))
}
