//! Error types

use thiserror::Error;

/// Errors raised when configuring or driving a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Page size of zero.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// Two columns share an id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    /// Breakpoints out of order.
    #[error("invalid breakpoints: mobile_max ({mobile_max}) must be below compact_max ({compact_max})")]
    InvalidBreakpoints {
        /// Configured mobile threshold.
        mobile_max: u32,
        /// Configured compact threshold.
        compact_max: u32,
    },

    /// Default sort names a column that does not exist.
    #[error("default sort references unknown column: {0}")]
    UnknownSortColumn(String),

    /// Grouping enabled by default without a group configuration.
    #[error("grouping enabled without a group configuration")]
    GroupingWithoutConfig,
}

/// Errors from a [`PreferenceStore`](crate::preferences::PreferenceStore).
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(serde_json::Error),
}

/// Errors raised before a bulk action runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkError {
    /// Nothing selected.
    #[error("{action}: no rows selected")]
    EmptySelection {
        /// Action id.
        action: String,
    },

    /// The action's disabled predicate rejected the selection.
    #[error("{action} is not available for the current selection")]
    Disabled {
        /// Action id.
        action: String,
    },
}

/// Errors reported by a bulk action's execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BulkActionError {
    /// Some items failed.
    #[error("{failed} of {total} items failed: {message}")]
    Partial {
        /// Failed item count.
        failed: usize,
        /// Attempted item count.
        total: usize,
        /// First failure message.
        message: String,
    },

    /// The action failed as a whole.
    #[error("action failed: {0}")]
    Failed(String),
}
