//! Tests for enable, disable and delete bulk actions.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use datagrid::bulk;
use datagrid::{BulkActionError, BulkError, DataTable, RowKey};
use proxyadmin_lib::api::{DeleteAction, DisableAction, EnableAction, EntityApi};
use proxyadmin_lib::error::ApiError;
use proxyadmin_lib::model::{HostLike, ProxyHost, parse_snapshot};
use proxyadmin_lib::pages::proxy_hosts;

#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<(String, i64)>>,
    missing: Vec<i64>,
}

impl RecordingApi {
    fn record(&self, op: &str, host: &ProxyHost) -> Result<(), ApiError> {
        if self.missing.contains(&host.id) {
            return Err(ApiError::NotFound {
                entity: "proxy-host".into(),
                key: RowKey::Int(host.id),
            });
        }
        self.calls.lock().unwrap().push((op.to_string(), host.id));
        Ok(())
    }

    fn calls(&self) -> Vec<(String, i64)> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl EntityApi<ProxyHost> for RecordingApi {
    async fn enable(&self, item: &ProxyHost) -> Result<(), ApiError> {
        self.record("enable", item)
    }

    async fn disable(&self, item: &ProxyHost) -> Result<(), ApiError> {
        self.record("disable", item)
    }

    async fn delete(&self, item: &ProxyHost) -> Result<(), ApiError> {
        self.record("delete", item)
    }
}

fn table() -> DataTable<ProxyHost> {
    let path = format!("{}/tests/fixtures/proxy_hosts.json", env!("CARGO_MANIFEST_DIR"));
    let raw = std::fs::read_to_string(path).unwrap();
    let mut table = DataTable::new(proxy_hosts::table_config()).unwrap();
    table.set_items(parse_snapshot(&raw).unwrap());
    table
}

#[tokio::test]
async fn test_delete_runs_for_every_selected_host() {
    let api = Arc::new(RecordingApi::default());
    let action = DeleteAction::<ProxyHost>::new(api.clone());
    let mut table = table();
    table.toggle_selection(RowKey::Int(1));
    table.toggle_selection(RowKey::Int(4));

    let request = table.prepare_bulk(&action).unwrap();
    assert_eq!(
        request.confirmation.as_deref(),
        Some("Are you sure you want to delete 2 item(s)? This cannot be undone.")
    );

    let count = bulk::run(&action, request).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(api.calls(), vec![("delete".into(), 1), ("delete".into(), 4)]);
    assert_eq!(table.selected_count(), 2);
}

#[tokio::test]
async fn test_partial_failure_reports_first_error() {
    let api = Arc::new(RecordingApi {
        missing: vec![2],
        ..Default::default()
    });
    let action = DisableAction::<ProxyHost>::new(api.clone());
    let mut table = table();
    table.toggle_selection(RowKey::Int(1));
    table.toggle_selection(RowKey::Int(2));

    let request = table.prepare_bulk(&action).unwrap();
    assert!(!request.needs_confirmation());
    let err = bulk::run(&action, request).await.unwrap_err();
    assert_eq!(
        err,
        BulkActionError::Partial {
            failed: 1,
            total: 2,
            message: "proxy-host 2 not found".into(),
        }
    );
    assert_eq!(api.calls(), vec![("disable".into(), 1)]);
}

#[test]
fn test_enable_disabled_when_all_enabled() {
    let api: Arc<dyn EntityApi<ProxyHost>> = Arc::new(RecordingApi::default());
    let enable = EnableAction::new(api.clone());
    let disable = DisableAction::new(api);
    let mut table = table();

    table.toggle_selection(RowKey::Int(1));
    assert_eq!(
        table.prepare_bulk(&enable).unwrap_err(),
        BulkError::Disabled {
            action: "enable".into()
        }
    );
    assert!(table.prepare_bulk(&disable).is_ok());

    table.toggle_selection(RowKey::Int(3));
    assert!(table.prepare_bulk(&enable).is_ok());
}

#[test]
fn test_empty_selection_and_vanished_rows() {
    let action = DeleteAction::<ProxyHost>::new(Arc::new(RecordingApi::default()));
    let mut table = table();
    assert_eq!(
        table.prepare_bulk(&action).unwrap_err(),
        BulkError::EmptySelection {
            action: "delete".into()
        }
    );

    table.toggle_selection(RowKey::Int(1));
    table.toggle_selection(RowKey::Int(3));
    let remaining: Vec<ProxyHost> = table.items().iter().filter(|h| h.id != 3).cloned().collect();
    table.set_items(remaining);

    let request = table.prepare_bulk(&action).unwrap();
    let ids: Vec<i64> = request.items.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn test_speculative_toggle_then_rollback() {
    let mut table = table();
    let key = RowKey::Int(3);
    table.speculate(&key, |host| host.set_enabled(true));
    assert!(table.items()[2].is_enabled());

    table.rollback_patch(&key);
    assert!(!table.items()[2].is_enabled());
}
