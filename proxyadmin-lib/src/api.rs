//! Bulk actions against the backend
//!
//! The backend itself sits behind [`EntityApi`]; actions fan the per-record
//! calls out concurrently and fold the results into one outcome.

use std::sync::Arc;

use async_trait::async_trait;
use datagrid::bulk::BulkAction;
use datagrid::{BulkActionError, GridRow};
use futures::future::join_all;

use crate::error::ApiError;
use crate::model::HostLike;

/// Per-record operations of one entity endpoint.
#[async_trait]
pub trait EntityApi<T: Send + Sync + 'static>: Send + Sync {
    async fn enable(&self, item: &T) -> Result<(), ApiError>;
    async fn disable(&self, item: &T) -> Result<(), ApiError>;
    async fn delete(&self, item: &T) -> Result<(), ApiError>;
}

/// Folds per-record results: the first failure is reported with the count.
fn summarize(action: &str, results: Vec<Result<(), ApiError>>) -> Result<(), BulkActionError> {
    let total = results.len();
    let failures: Vec<ApiError> = results.into_iter().filter_map(Result::err).collect();
    for error in &failures {
        log::warn!("{}: {}", action, error);
    }
    match failures.first() {
        None => Ok(()),
        Some(first) => Err(BulkActionError::Partial {
            failed: failures.len(),
            total,
            message: first.to_string(),
        }),
    }
}

/// Switches hosts on. Unavailable when every selected host is already on.
pub struct EnableAction<T: Send + Sync + 'static> {
    api: Arc<dyn EntityApi<T>>,
}

impl<T: Send + Sync + 'static> EnableAction<T> {
    pub fn new(api: Arc<dyn EntityApi<T>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<T: HostLike> BulkAction<T> for EnableAction<T> {
    fn id(&self) -> &str {
        "enable"
    }

    fn label(&self) -> &str {
        "Enable"
    }

    fn is_disabled(&self, selected: &[T]) -> bool {
        selected.iter().all(|host| host.is_enabled())
    }

    async fn execute(&self, items: Vec<T>) -> Result<(), BulkActionError> {
        let results = join_all(items.iter().map(|item| self.api.enable(item))).await;
        summarize(self.id(), results)
    }
}

/// Switches hosts off. Unavailable when every selected host is already off.
pub struct DisableAction<T: Send + Sync + 'static> {
    api: Arc<dyn EntityApi<T>>,
}

impl<T: Send + Sync + 'static> DisableAction<T> {
    pub fn new(api: Arc<dyn EntityApi<T>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<T: HostLike> BulkAction<T> for DisableAction<T> {
    fn id(&self) -> &str {
        "disable"
    }

    fn label(&self) -> &str {
        "Disable"
    }

    fn is_disabled(&self, selected: &[T]) -> bool {
        selected.iter().all(|host| !host.is_enabled())
    }

    async fn execute(&self, items: Vec<T>) -> Result<(), BulkActionError> {
        let results = join_all(items.iter().map(|item| self.api.disable(item))).await;
        summarize(self.id(), results)
    }
}

/// Deletes records after confirmation.
pub struct DeleteAction<T: Send + Sync + 'static> {
    api: Arc<dyn EntityApi<T>>,
}

impl<T: Send + Sync + 'static> DeleteAction<T> {
    pub fn new(api: Arc<dyn EntityApi<T>>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<T: GridRow + Send + Sync + 'static> BulkAction<T> for DeleteAction<T> {
    fn id(&self) -> &str {
        "delete"
    }

    fn label(&self) -> &str {
        "Delete"
    }

    fn confirm_message(&self) -> Option<&str> {
        Some("Are you sure you want to delete {count} item(s)? This cannot be undone.")
    }

    async fn execute(&self, items: Vec<T>) -> Result<(), BulkActionError> {
        let results = join_all(items.iter().map(|item| self.api.delete(item))).await;
        summarize(self.id(), results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_reports_first_failure() {
        let results = vec![
            Ok(()),
            Err(ApiError::http(500, "boom")),
            Err(ApiError::Network("unreachable".into())),
        ];
        assert_eq!(
            summarize("delete", results),
            Err(BulkActionError::Partial {
                failed: 2,
                total: 3,
                message: "HTTP 500: boom".into(),
            })
        );
        assert_eq!(summarize("delete", vec![Ok(()), Ok(())]), Ok(()));
    }
}
