//! Table definitions for each admin page.
//!
//! Every page module exposes `columns()`, `filters()` and `table_config()`;
//! host pages add `group_config()`.

pub mod access_lists;
pub mod audit_log;
mod common;
pub mod proxy_hosts;
pub mod redirection_hosts;
pub mod settings;
pub mod users;

pub use common::*;

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The admin pages backed by a data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    ProxyHosts,
    RedirectionHosts,
    AccessLists,
    Users,
    AuditLog,
    Settings,
}

impl Page {
    /// All pages, in navigation order.
    pub const ALL: [Page; 6] = [
        Page::ProxyHosts,
        Page::RedirectionHosts,
        Page::AccessLists,
        Page::Users,
        Page::AuditLog,
        Page::Settings,
    ];

    /// Table name, also used as the preference namespace.
    pub fn name(self) -> &'static str {
        match self {
            Page::ProxyHosts => proxy_hosts::NAME,
            Page::RedirectionHosts => redirection_hosts::NAME,
            Page::AccessLists => access_lists::NAME,
            Page::Users => users::NAME,
            Page::AuditLog => audit_log::NAME,
            Page::Settings => settings::NAME,
        }
    }

    /// Page title.
    pub fn title(self) -> &'static str {
        match self {
            Page::ProxyHosts => "Proxy Hosts",
            Page::RedirectionHosts => "Redirection Hosts",
            Page::AccessLists => "Access Lists",
            Page::Users => "Users",
            Page::AuditLog => "Audit Log",
            Page::Settings => "Settings",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = ModelError;

    /// Accepts table names with either `_` or `-` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Page::ALL
            .into_iter()
            .find(|page| page.name() == normalized)
            .ok_or_else(|| ModelError::UnknownEntity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_str() {
        assert_eq!("proxy-hosts".parse::<Page>().unwrap(), Page::ProxyHosts);
        assert_eq!("audit_log".parse::<Page>().unwrap(), Page::AuditLog);
        assert!(matches!(
            "certificates".parse::<Page>(),
            Err(ModelError::UnknownEntity(_))
        ));
    }
}
