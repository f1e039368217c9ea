//! Proxy hosts page

use datagrid::filter::{FilterDef, FilterStrategies};
use datagrid::group::GroupConfig;
use datagrid::{CellValue, Column, Priority, SortState, TableConfig};

use super::common::{
    domain_column, domain_group, format_date, host_search, host_strategies, ssl_column,
    ssl_filter, status_column, status_filter,
};
use crate::model::ProxyHost;

pub const NAME: &str = "proxy_hosts";

/// Preference key remembering the group-by-domain toggle.
pub const GROUP_PREFERENCE_KEY: &str = "proxy_hosts.group_by_domain";

pub fn columns() -> Vec<Column<ProxyHost>> {
    vec![
        domain_column(),
        Column::new("destination", "Destination", |h: &ProxyHost| CellValue::from(h.destination()))
            .sortable()
            .priority(Priority::P2),
        ssl_column(),
        Column::new("access", "Access", |h: &ProxyHost| CellValue::from(h.access_label()))
            .priority(Priority::P3),
        status_column(),
        Column::new("created", "Created", |h: &ProxyHost| CellValue::from(h.created_on))
            .sortable()
            .priority(Priority::P3)
            .render(|h: &ProxyHost| format_date(&h.created_on)),
    ]
}

pub fn filters() -> Vec<FilterDef> {
    vec![ssl_filter(), status_filter()]
}

pub fn strategies() -> FilterStrategies<ProxyHost> {
    host_strategies()
}

pub fn group_config() -> GroupConfig<ProxyHost> {
    domain_group()
}

pub fn table_config() -> TableConfig<ProxyHost> {
    TableConfig::new(NAME)
        .with_columns(columns())
        .with_filters(filters())
        .with_filter_mode(strategies())
        .with_search(host_search())
        .with_group(group_config())
        .with_grouping_preference(GROUP_PREFERENCE_KEY)
        .with_default_sort(SortState::asc("domain"))
}
