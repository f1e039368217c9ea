//! Access lists

use chrono::{DateTime, Utc};
use datagrid::{GridRow, RowKey};
use serde::{Deserialize, Serialize};

use super::Owner;

/// A basic-auth credential on an access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessListItem {
    pub username: String,
    /// Write-only; never returned by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Allow or deny rule for a client address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientDirective {
    Allow,
    Deny,
}

/// A client address rule on an access list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessListClient {
    /// IP address or CIDR range.
    pub address: String,
    pub directive: ClientDirective,
}

/// Access restrictions shared by proxy hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessList {
    pub id: i64,
    pub created_on: DateTime<Utc>,
    pub name: String,
    /// Whether passing either check is enough (otherwise both are required).
    #[serde(default)]
    pub satisfy_any: bool,
    #[serde(default)]
    pub pass_auth: bool,
    #[serde(default)]
    pub items: Vec<AccessListItem>,
    #[serde(default)]
    pub clients: Vec<AccessListClient>,
    #[serde(default)]
    pub proxy_host_count: i64,
    #[serde(default)]
    pub owner: Option<Owner>,
}

impl AccessList {
    /// `"Any"` or `"All"`.
    pub fn satisfy_label(&self) -> &'static str {
        if self.satisfy_any { "Any" } else { "All" }
    }

    /// Whether any username or client address contains `needle` (lowercased).
    pub fn nested_contains(&self, needle: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.username.to_lowercase().contains(needle))
            || self
                .clients
                .iter()
                .any(|client| client.address.to_lowercase().contains(needle))
    }
}

impl GridRow for AccessList {
    fn key(&self) -> RowKey {
        RowKey::Int(self.id)
    }
}
