//! Error types

use datagrid::{BulkError, PreferenceError, TableError};
use proxyadmin_lib::error::ModelError;
use thiserror::Error;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Bulk(#[from] BulkError),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error("invalid breakpoints file: {0}")]
    Breakpoints(serde_json::Error),

    #[error("invalid filter {0:?}: expected ID=VALUE")]
    InvalidFilter(String),

    #[error("{0} is not available on this page")]
    UnsupportedAction(String),

    #[error("{0} (pass --yes to confirm)")]
    ConfirmationRequired(String),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
