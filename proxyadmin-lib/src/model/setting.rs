//! Global settings

use datagrid::{GridRow, RowKey};
use serde::{Deserialize, Serialize};

/// A named global setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Stable string id, e.g. `default-site`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl Setting {
    /// Value as shown in the table: strings unquoted, everything else as JSON.
    pub fn value_text(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl GridRow for Setting {
    fn key(&self) -> RowKey {
        RowKey::Text(self.id.clone())
    }
}
