//! Typed records

mod access_list;
mod audit;
mod host;
mod setting;
mod user;

pub use access_list::*;
pub use audit::*;
pub use host::*;
pub use setting::*;
pub use user::*;

use serde::de::DeserializeOwned;

use crate::error::ModelError;

/// Decodes a collection snapshot (a JSON array of records).
///
/// # Example
///
/// ```
/// use proxyadmin_lib::model::{Setting, parse_snapshot};
///
/// let raw = r#"[{"id": "default-site", "name": "Default Site", "value": "congratulations"}]"#;
/// let settings: Vec<Setting> = parse_snapshot(raw).unwrap();
/// assert_eq!(settings[0].id, "default-site");
/// ```
pub fn parse_snapshot<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, ModelError> {
    let items: Vec<T> = serde_json::from_str(raw)?;
    log::debug!("Decoded snapshot of {} records", items.len());
    Ok(items)
}

/// The user a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Owner {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
}

impl Owner {
    /// Name to show, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.email } else { &self.name }
    }
}
