//! Bulk actions over the selected rows.
//!
//! The table resolves the selection into a [`BulkRequest`]; running it is
//! the caller's job and happens outside the pipeline. Selection is never
//! cleared here: callers clear it once the action succeeded and refresh
//! the input collection.

use async_trait::async_trait;

use crate::error::{BulkActionError, BulkError};

/// An action applied to every selected row at once.
#[async_trait]
pub trait BulkAction<T: Send + Sync + 'static>: Send + Sync {
    /// Unique action id.
    fn id(&self) -> &str;

    /// Button label.
    fn label(&self) -> &str;

    /// Confirmation prompt template. `{count}` is replaced with the number of
    /// selected rows.
    fn confirm_message(&self) -> Option<&str> {
        None
    }

    /// Whether the action is unavailable for this selection.
    fn is_disabled(&self, _selected: &[T]) -> bool {
        false
    }

    /// Executes the action.
    async fn execute(&self, items: Vec<T>) -> Result<(), BulkActionError>;
}

/// A bulk action resolved against the current selection.
#[derive(Debug, Clone)]
pub struct BulkRequest<T> {
    /// Id of the action to run.
    pub action_id: String,
    /// Selected rows, resolved from the unfiltered collection.
    pub items: Vec<T>,
    /// Confirmation prompt to show first, if the action has one.
    pub confirmation: Option<String>,
}

impl<T> BulkRequest<T> {
    /// Number of rows the action will touch.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the user must confirm before running.
    pub fn needs_confirmation(&self) -> bool {
        self.confirmation.is_some()
    }
}

/// Substitutes `{count}` in a confirmation template.
pub fn confirmation_prompt(template: &str, count: usize) -> String {
    template.replace("{count}", &count.to_string())
}

/// Builds a request for `action` over `selected`.
pub fn prepare<T: Send + Sync + 'static>(
    action: &dyn BulkAction<T>,
    selected: Vec<T>,
) -> Result<BulkRequest<T>, BulkError> {
    if selected.is_empty() {
        return Err(BulkError::EmptySelection {
            action: action.id().to_string(),
        });
    }
    if action.is_disabled(&selected) {
        return Err(BulkError::Disabled {
            action: action.id().to_string(),
        });
    }
    Ok(BulkRequest {
        action_id: action.id().to_string(),
        confirmation: action
            .confirm_message()
            .map(|template| confirmation_prompt(template, selected.len())),
        items: selected,
    })
}

/// Runs a prepared request. Returns the number of rows processed.
pub async fn run<T: Send + Sync + 'static>(
    action: &dyn BulkAction<T>,
    request: BulkRequest<T>,
) -> Result<usize, BulkActionError> {
    let count = request.count();
    log::info!("Running bulk action {} on {} rows", request.action_id, count);
    match action.execute(request.items).await {
        Ok(()) => Ok(count),
        Err(e) => {
            log::warn!("Bulk action {} failed: {}", action.id(), e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Delete {
        deleted: Mutex<Vec<i64>>,
        fail: bool,
    }

    #[async_trait]
    impl BulkAction<i64> for Delete {
        fn id(&self) -> &str {
            "delete"
        }

        fn label(&self) -> &str {
            "Delete"
        }

        fn confirm_message(&self) -> Option<&str> {
            Some("Delete {count} hosts?")
        }

        fn is_disabled(&self, selected: &[i64]) -> bool {
            selected.contains(&0)
        }

        async fn execute(&self, items: Vec<i64>) -> Result<(), BulkActionError> {
            if self.fail {
                return Err(BulkActionError::Failed("backend down".into()));
            }
            self.deleted.lock().unwrap().extend(items);
            Ok(())
        }
    }

    fn action(fail: bool) -> Delete {
        Delete {
            deleted: Mutex::new(Vec::new()),
            fail,
        }
    }

    #[test]
    fn test_prepare_substitutes_count() {
        let request = prepare(&action(false), vec![1, 2, 3]).unwrap();
        assert_eq!(request.confirmation.as_deref(), Some("Delete 3 hosts?"));
        assert!(request.needs_confirmation());
    }

    #[test]
    fn test_prepare_rejects_empty_and_disabled() {
        assert_eq!(
            prepare(&action(false), vec![]).unwrap_err(),
            BulkError::EmptySelection {
                action: "delete".into()
            }
        );
        assert!(matches!(
            prepare(&action(false), vec![0, 1]),
            Err(BulkError::Disabled { .. })
        ));
    }

    #[tokio::test]
    async fn test_run_reports_count() {
        let delete = action(false);
        let request = prepare(&delete, vec![4, 5]).unwrap();
        assert_eq!(run(&delete, request).await, Ok(2));
        assert_eq!(*delete.deleted.lock().unwrap(), vec![4, 5]);
    }

    #[tokio::test]
    async fn test_run_propagates_failure() {
        let delete = action(true);
        let request = prepare(&delete, vec![4]).unwrap();
        assert!(run(&delete, request).await.is_err());
    }
}
