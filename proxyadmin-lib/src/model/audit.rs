//! Audit log

use chrono::{DateTime, Utc};
use datagrid::{GridRow, RowKey};
use serde::{Deserialize, Serialize};

use super::Owner;

/// One recorded change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub created_on: DateTime<Utc>,
    pub user_id: i64,
    /// Kind of object changed, e.g. `proxy-host`.
    pub object_type: String,
    pub object_id: i64,
    /// What happened, e.g. `created`, `deleted`.
    pub action: String,
    #[serde(default)]
    pub user: Option<Owner>,
    #[serde(default)]
    pub meta: serde_json::Value,
}

impl AuditLogEntry {
    /// Acting user's name, or `#<id>` when the user is gone.
    pub fn user_label(&self) -> String {
        match &self.user {
            Some(user) => user.display_name().to_string(),
            None => format!("#{}", self.user_id),
        }
    }
}

impl GridRow for AuditLogEntry {
    fn key(&self) -> RowKey {
        RowKey::Int(self.id)
    }
}
