//! Users page

use datagrid::filter::{FilterDef, FilterKind, FilterStrategies, bool_field, role_membership};
use datagrid::{CellValue, Column, Priority, SortState, TableConfig};

use crate::model::{ADMIN_ROLE, User, user_roles};

pub const NAME: &str = "users";

pub fn columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name", |u: &User| CellValue::from(u.name.as_str()))
            .sortable()
            .priority(Priority::P1)
            .render(|u: &User| {
                if u.nickname.is_empty() || u.nickname == u.name {
                    u.name.clone()
                } else {
                    format!("{} ({})", u.name, u.nickname)
                }
            }),
        Column::new("email", "Email", |u: &User| CellValue::from(u.email.as_str()))
            .sortable()
            .priority(Priority::P2),
        Column::new("roles", "Roles", |u: &User| CellValue::from(u.roles.clone()))
            .priority(Priority::P2)
            .render(|u: &User| u.role_label().to_string()),
        Column::new("status", "Status", |u: &User| CellValue::from(!u.is_disabled))
            .sortable()
            .priority(Priority::P1)
            .render(|u: &User| (if u.is_disabled { "Disabled" } else { "Active" }).to_string()),
    ]
}

pub fn filters() -> Vec<FilterDef> {
    vec![
        FilterDef::new("roles", "Role")
            .kind(FilterKind::Select)
            .option("all", "All")
            .option(ADMIN_ROLE, "Administrator")
            .option("user", "User")
            .default_value("all"),
        FilterDef::new("is_disabled", "Status")
            .kind(FilterKind::Select)
            .option("all", "All")
            .option("false", "Active")
            .option("true", "Disabled")
            .default_value("all"),
    ]
}

pub fn strategies() -> FilterStrategies<User> {
    FilterStrategies::new()
        .with("roles", role_membership(ADMIN_ROLE, user_roles))
        .with("is_disabled", bool_field(|u: &User| u.is_disabled))
}

pub fn table_config() -> TableConfig<User> {
    TableConfig::new(NAME)
        .with_columns(columns())
        .with_filters(filters())
        .with_filter_mode(strategies())
        .with_default_sort(SortState::asc("name"))
}
