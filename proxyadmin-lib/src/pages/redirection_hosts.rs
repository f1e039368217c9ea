//! Redirection hosts page

use datagrid::filter::{FilterDef, FilterStrategies};
use datagrid::group::GroupConfig;
use datagrid::{Alignment, CellValue, Column, Priority, SortState, TableConfig};

use super::common::{
    domain_column, domain_group, host_search, host_strategies, ssl_column, ssl_filter,
    status_column, status_filter,
};
use crate::model::RedirectionHost;

pub const NAME: &str = "redirection_hosts";

/// Preference key remembering the group-by-domain toggle.
pub const GROUP_PREFERENCE_KEY: &str = "redirection_hosts.group_by_domain";

pub fn columns() -> Vec<Column<RedirectionHost>> {
    vec![
        domain_column(),
        Column::new("forward_http_code", "HTTP Code", |h: &RedirectionHost| {
            CellValue::from(h.forward_http_code)
        })
        .sortable()
        .priority(Priority::P2)
        .align(Alignment::Right),
        Column::new("destination", "Destination", |h: &RedirectionHost| {
            CellValue::from(h.destination())
        })
        .sortable()
        .priority(Priority::P2),
        ssl_column(),
        status_column(),
    ]
}

pub fn filters() -> Vec<FilterDef> {
    vec![ssl_filter(), status_filter()]
}

pub fn strategies() -> FilterStrategies<RedirectionHost> {
    host_strategies()
}

pub fn group_config() -> GroupConfig<RedirectionHost> {
    domain_group()
}

pub fn table_config() -> TableConfig<RedirectionHost> {
    TableConfig::new(NAME)
        .with_columns(columns())
        .with_filters(filters())
        .with_filter_mode(strategies())
        .with_search(host_search())
        .with_group(group_config())
        .with_grouping_preference(GROUP_PREFERENCE_KEY)
        .with_default_sort(SortState::asc("domain"))
}
