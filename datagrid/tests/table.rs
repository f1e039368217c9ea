//! Integration tests for the table orchestrator.

use datagrid::filter::{FilterStrategies, FilterValue, bool_field};
use datagrid::group::GroupConfig;
use datagrid::preferences::{MemoryPreferences, Preferences};
use datagrid::selection::SelectionStatus;
use datagrid::table::PatchState;
use datagrid::{
    CellValue, Column, DataTable, GridRow, Priority, ResponsiveMode, RowKey, SortState,
    TableConfig, TableError,
};

#[derive(Debug, Clone, PartialEq)]
struct Host {
    id: i64,
    domain: String,
    ssl: bool,
    code: Option<i64>,
}

impl GridRow for Host {
    fn key(&self) -> RowKey {
        RowKey::Int(self.id)
    }
}

fn host(id: i64, domain: &str) -> Host {
    Host {
        id,
        domain: domain.to_string(),
        ssl: id % 2 == 0,
        code: None,
    }
}

fn base_domain(host: &Host) -> String {
    let labels: Vec<&str> = host.domain.split('.').collect();
    labels[labels.len().saturating_sub(2)..].join(".")
}

fn config() -> TableConfig<Host> {
    TableConfig::new("hosts")
        .with_columns(vec![
            Column::new("domain", "Domain", |h: &Host| CellValue::from(h.domain.as_str()))
                .sortable()
                .priority(Priority::P1),
            Column::new("ssl", "SSL", |h: &Host| CellValue::from(h.ssl)).priority(Priority::P2),
            Column::new("code", "Code", |h: &Host| CellValue::from(h.code))
                .sortable()
                .priority(Priority::P3),
        ])
        .with_filter_mode(FilterStrategies::new().with("ssl", bool_field(|h: &Host| h.ssl)))
        .with_group(GroupConfig::new(base_domain))
        .with_page_size(10)
}

fn numbered(n: i64) -> Vec<Host> {
    (1..=n).map(|i| host(i, &format!("h{i:02}.example.com"))).collect()
}

fn page_ids(table: &DataTable<Host>) -> Vec<i64> {
    table.view().page_items().iter().map(|h| h.id).collect()
}

#[test]
fn test_select_all_is_scoped_to_page() {
    let mut table = DataTable::new(config()).unwrap();
    table.set_items(numbered(25));

    let added = table.select_all_on_page();
    assert_eq!(added.len(), 10);
    assert!(table.is_all_selected_on_page());

    table.set_page(1);
    assert_eq!(table.page_selection_status(), SelectionStatus::None);
    table.toggle_selection(RowKey::Int(11));
    assert!(table.is_indeterminate_on_page());

    table.set_page(0);
    assert_eq!(table.deselect_all_on_page().len(), 10);
    assert_eq!(table.selected_keys(), vec![RowKey::Int(11)]);
}

#[test]
fn test_selection_survives_search_and_paging() {
    let mut table = DataTable::new(config()).unwrap();
    table.set_items(numbered(25));

    table.toggle_selection(RowKey::Int(3));
    assert!(table.toggle_row(&host(24, "h24.example.com")));
    table.set_search("h24");
    assert_eq!(page_ids(&table), vec![24]);
    assert_eq!(table.selected_count(), 2);

    let selected: Vec<i64> = table.selected_items().iter().map(|h| h.id).collect();
    assert_eq!(selected, vec![3, 24]);
}

#[test]
fn test_transitions_reset_page() {
    let mut table = DataTable::new(config()).unwrap();
    table.set_items(numbered(25));

    table.set_page(2);
    table.set_search("example");
    assert_eq!(table.state().page_index, 0);

    table.set_page(2);
    table.set_filter("ssl", Some(FilterValue::Bool(true)));
    assert_eq!(table.state().page_index, 0);
    assert!(table.view().rows.iter().all(|h| h.ssl));

    table.set_page(1);
    table.set_sort("domain");
    assert_eq!(table.state().page_index, 0);

    table.set_page(1);
    table.set_page_size(5).unwrap();
    assert_eq!(table.state().page_index, 0);

    table.set_page(2);
    table.clear_filters();
    assert_eq!(table.state().page_index, 0);
    assert_eq!(table.view().total_filtered(), 25);

    table.set_page(2);
    assert!(table.toggle_grouping());
    assert_eq!(table.state().page_index, 0);

    table.set_page(2);
    table.toggle_grouping();
    assert_eq!(table.state().page_index, 0);
}

#[test]
fn test_sort_toggles_and_keeps_nulls_last() {
    let mut table = DataTable::new(config()).unwrap();
    let mut items = vec![host(1, "a.com"), host(2, "b.com"), host(3, "c.com")];
    items[0].code = Some(301);
    items[2].code = Some(302);
    table.set_items(items);

    table.set_sort("code");
    assert_eq!(page_ids(&table), vec![1, 3, 2]);
    table.set_sort("code");
    assert_eq!(page_ids(&table), vec![3, 1, 2]);
}

#[test]
fn test_out_of_range_page_is_empty() {
    let mut table = DataTable::new(config()).unwrap();
    table.set_items(numbered(5));
    table.set_page(7);

    let view = table.view();
    assert!(view.page_items().is_empty());
    assert_eq!(view.page.status_text(), "0 of 5");
}

#[test]
fn test_zero_page_size_rejected() {
    let mut table = DataTable::new(config()).unwrap();
    assert_eq!(table.set_page_size(0), Err(TableError::InvalidPageSize));
    assert_eq!(table.state().page_size, 10);
}

#[test]
fn test_reset_restores_defaults() {
    let mut table = DataTable::new(config().with_default_sort(SortState::desc("domain"))).unwrap();
    table.set_items(numbered(25));
    let initial = table.state().clone();

    table.set_search("h1");
    table.set_filter("ssl", Some(FilterValue::Bool(false)));
    table.set_sort("code");
    table.set_page(1);
    table.set_page_size(25).unwrap();
    table.toggle_grouping();
    table.toggle_group("example.com");
    table.toggle_selection(RowKey::Int(1));
    assert_ne!(table.state(), &initial);

    table.reset_all();
    assert_eq!(table.state(), &initial);
}

#[test]
fn test_grouping_flattens_expanded_groups() {
    let mut table = DataTable::new(config()).unwrap();
    table.set_items(vec![
        host(1, "a.foo.com"),
        host(2, "x.bar.com"),
        host(3, "b.foo.com"),
        host(4, "y.bar.com"),
    ]);

    assert!(table.toggle_grouping());
    assert_eq!(page_ids(&table), vec![1, 3, 2, 4]);

    table.toggle_group("foo.com");
    let view = table.view();
    assert_eq!(view.groups.as_ref().map(Vec::len), Some(2));
    let ids: Vec<i64> = view.page_items().iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![2, 4]);

    let sections = view.page_sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].group.id, "foo.com");
    assert!(sections[0].items.is_empty());
    drop(view);

    table.collapse_all_groups();
    assert!(table.view().page_items().is_empty());
    table.expand_all_groups();
    assert_eq!(page_ids(&table).len(), 4);
}

fn section_sizes(table: &DataTable<Host>) -> Vec<(String, usize)> {
    table
        .view()
        .page_sections()
        .iter()
        .map(|section| (section.group.id.clone(), section.items.len()))
        .collect()
}

#[test]
fn test_collapsed_groups_take_no_page_capacity() {
    let mut table = DataTable::new(config()).unwrap();
    let mut items = Vec::new();
    for (group, count, first) in [("a", 3, 0), ("b", 5, 3), ("c", 4, 8)] {
        for id in first..first + count {
            items.push(host(id, &format!("h{id}.{group}.com")));
        }
    }
    table.set_items(items);
    table.set_page_size(4).unwrap();
    table.toggle_grouping();
    table.toggle_group("b.com");

    assert_eq!(page_ids(&table), vec![0, 1, 2, 8]);
    assert_eq!(
        section_sizes(&table),
        vec![("a.com".to_string(), 3), ("b.com".to_string(), 0), ("c.com".to_string(), 1)]
    );
    assert_eq!(table.view().page.page_count, 2);

    table.set_page(1);
    assert_eq!(page_ids(&table), vec![9, 10, 11]);
    assert_eq!(section_sizes(&table), vec![("c.com".to_string(), 3)]);

    // Trailing collapsed groups show on the last page.
    table.toggle_group("c.com");
    table.set_page(0);
    assert_eq!(page_ids(&table), vec![0, 1, 2]);
    assert_eq!(
        section_sizes(&table),
        vec![("a.com".to_string(), 3), ("b.com".to_string(), 0), ("c.com".to_string(), 0)]
    );
}

#[test]
fn test_grouping_without_config_is_noop() {
    let config = TableConfig::new("plain").with_columns(vec![Column::new(
        "domain",
        "Domain",
        |h: &Host| CellValue::from(h.domain.as_str()),
    )]);
    let mut table = DataTable::new(config).unwrap();
    table.set_items(numbered(3));
    assert!(!table.toggle_grouping());
    assert!(!table.view().is_grouped());
}

#[test]
fn test_grouping_preference_persists() {
    let prefs = Preferences::new(MemoryPreferences::new());
    let remembered = || config().with_grouping_preference("hosts.group_by_domain");

    let mut table = DataTable::with_preferences(remembered(), prefs.clone()).unwrap();
    assert!(!table.is_grouping_enabled());
    table.toggle_grouping();

    let restored = DataTable::with_preferences(remembered(), prefs.clone()).unwrap();
    assert!(restored.is_grouping_enabled());
    assert_eq!(prefs.get::<bool>("hosts.group_by_domain").unwrap(), Some(true));
}

#[test]
fn test_speculative_patch_rollback() {
    let mut table = DataTable::new(config()).unwrap();
    table.set_items(numbered(3));
    let key = RowKey::Int(2);

    assert_eq!(table.speculate(&key, |h| h.ssl = false), Some(PatchState::Pending));
    assert_eq!(table.speculate(&key, |h| h.domain = "changed.com".into()), Some(PatchState::Pending));
    assert_eq!(table.pending_patches(), vec![key.clone()]);

    assert_eq!(table.rollback_patch(&key), Some(PatchState::RolledBack));
    assert_eq!(table.items()[1], host(2, "h02.example.com"));
    assert_eq!(table.rollback_patch(&key), None);

    assert_eq!(table.speculate(&RowKey::Int(99), |h| h.ssl = true), None);
}

#[test]
fn test_speculative_patch_confirm_and_snapshot() {
    let mut table = DataTable::new(config()).unwrap();
    table.set_items(numbered(3));

    table.speculate(&RowKey::Int(1), |h| h.code = Some(302));
    assert_eq!(table.confirm_patch(&RowKey::Int(1)), Some(PatchState::Confirmed));
    assert_eq!(table.items()[0].code, Some(302));

    table.speculate(&RowKey::Int(3), |h| h.code = Some(301));
    table.set_items(numbered(3));
    assert!(table.pending_patches().is_empty());
}

#[test]
fn test_responsive_boundaries() {
    let table = DataTable::new(config()).unwrap();
    assert_eq!(table.mode_for_width(599), ResponsiveMode::Mobile);
    assert_eq!(table.mode_for_width(600), ResponsiveMode::Compact);
    assert_eq!(table.mode_for_width(1199), ResponsiveMode::Compact);
    assert_eq!(table.mode_for_width(1200), ResponsiveMode::Full);

    let mobile = table.layout(ResponsiveMode::Mobile);
    assert!(mobile.use_cards);
    assert_eq!(mobile.columns.len(), 1);

    let compact = table.layout(ResponsiveMode::Compact);
    assert!(!compact.use_cards);
    let ids: Vec<&str> = compact.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["domain", "ssl"]);
}
