//! Users

use chrono::{DateTime, Utc};
use datagrid::{GridRow, RowKey};
use serde::{Deserialize, Serialize};

/// Role granting full administrative access.
pub const ADMIN_ROLE: &str = "admin";

/// An admin interface user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub created_on: DateTime<Utc>,
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub is_disabled: bool,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }

    /// `"Administrator"` or `"User"`.
    pub fn role_label(&self) -> &'static str {
        if self.is_admin() { "Administrator" } else { "User" }
    }
}

/// Accessor handed to role filters.
pub fn user_roles(user: &User) -> &[String] {
    &user.roles
}

impl GridRow for User {
    fn key(&self) -> RowKey {
        RowKey::Int(self.id)
    }
}
