//! Error types

use datagrid::RowKey;

/// Errors raised while decoding a collection snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The snapshot is not valid JSON for the record type.
    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The entity name is not one of the known pages.
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
}

/// Errors reported by the entity API boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The record does not exist (any more).
    #[error("{entity} {key} not found")]
    NotFound {
        /// Entity name.
        entity: String,
        /// Record key.
        key: RowKey,
    },

    /// The backend rejected the request.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }
}
