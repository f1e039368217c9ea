//! Pieces shared by the host pages.

use chrono::{DateTime, Utc};
use datagrid::filter::{FilterDef, FilterKind, FilterPredicate, FilterStrategies, FilterValue, SearchConfig, predicate};
use datagrid::group::GroupConfig;
use datagrid::{CellValue, Column, Priority};

use crate::model::{HostLike, HostStatus, SslStatus};

/// Timestamp format used in table cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Registrable part of a domain: its last two labels.
///
/// Wildcards and case are normalised, so `*.App.Example.com` and
/// `api.example.com` share `example.com`. Names with fewer than two labels
/// are returned whole.
pub fn base_domain(domain: &str) -> String {
    let domain = domain.trim().trim_start_matches("*.").to_lowercase();
    let labels: Vec<&str> = domain.split('.').filter(|l| !l.is_empty()).collect();
    let start = labels.len().saturating_sub(2);
    labels[start..].join(".")
}

/// Groups hosts by the base domain of their first domain name.
pub fn domain_group<T: HostLike>() -> GroupConfig<T> {
    GroupConfig::new(|host: &T| base_domain(host.primary_domain()))
        .label(|id: &str, hosts: &[&T]| match hosts.len() {
            1 => format!("{} (1 host)", id),
            n => format!("{} ({} hosts)", id, n),
        })
}

/// Search over every column plus every domain name of the host.
pub fn host_search<T: HostLike>() -> SearchConfig<T> {
    SearchConfig::new().extension(|host: &T, query: &str| {
        host.domain_names()
            .iter()
            .any(|d| d.to_lowercase().contains(query))
    })
}

fn any_text(value: &FilterValue, mut f: impl FnMut(&str) -> bool) -> bool {
    match value {
        FilterValue::Many(values) => values.iter().any(|v| f(&v.as_text())),
        other => f(&other.as_text()),
    }
}

/// `enabled` keeps hosts with a certificate (forced or not), `forced` only
/// those enforcing HTTPS, `disabled` those without a certificate.
pub fn ssl_strategy<T: HostLike>() -> FilterPredicate<T> {
    predicate(|host: &T, value: &FilterValue| {
        let ssl = host.ssl_status();
        any_text(value, |wanted| match wanted {
            "enabled" => ssl != SslStatus::Disabled,
            other => ssl.as_str() == other,
        })
    })
}

/// `online` keeps served hosts, `offline` every other host, `disabled` only
/// hosts switched off.
pub fn status_strategy<T: HostLike>() -> FilterPredicate<T> {
    predicate(|host: &T, value: &FilterValue| {
        let status = host.status();
        any_text(value, |wanted| match wanted {
            "offline" => status != HostStatus::Online,
            other => status.as_str() == other,
        })
    })
}

/// Named strategies for the `ssl` and `status` filters.
pub fn host_strategies<T: HostLike>() -> FilterStrategies<T> {
    FilterStrategies::new()
        .with("ssl", ssl_strategy())
        .with("status", status_strategy())
}

pub fn ssl_filter() -> FilterDef {
    FilterDef::new("ssl", "SSL")
        .kind(FilterKind::Select)
        .option("all", "All")
        .option("enabled", "Enabled")
        .option("forced", "Forced")
        .option("disabled", "Disabled")
        .default_value("all")
}

pub fn status_filter() -> FilterDef {
    FilterDef::new("status", "Status")
        .kind(FilterKind::Select)
        .option("all", "All")
        .option("online", "Online")
        .option("offline", "Offline")
        .default_value("all")
}

pub fn domain_column<T: HostLike>() -> Column<T> {
    Column::new("domain", "Domain", |host: &T| CellValue::from(host.primary_domain()))
        .sortable()
        .priority(Priority::P1)
        .render(|host: &T| host.domain_names().join(", "))
}

pub fn ssl_column<T: HostLike>() -> Column<T> {
    Column::new("ssl", "SSL", |host: &T| CellValue::from(host.ssl_status().as_str()))
        .priority(Priority::P2)
        .render(|host: &T| host.ssl_status().label().to_string())
}

pub fn status_column<T: HostLike>() -> Column<T> {
    Column::new("status", "Status", |host: &T| CellValue::from(host.status().as_str()))
        .sortable()
        .priority(Priority::P1)
        .render(|host: &T| host.status().label().to_string())
}
