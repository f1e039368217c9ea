//! Proxy and redirection hosts

use chrono::{DateTime, Utc};
use datagrid::{GridRow, RowKey};
use serde::{Deserialize, Serialize};

use super::Owner;

/// Runtime state reported by the proxy for a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMeta {
    #[serde(default = "default_online")]
    pub nginx_online: bool,
    #[serde(default)]
    pub nginx_err: Option<String>,
    #[serde(default)]
    pub letsencrypt_agree: bool,
    #[serde(default)]
    pub dns_challenge: bool,
}

fn default_online() -> bool {
    true
}

impl Default for HostMeta {
    fn default() -> Self {
        Self {
            nginx_online: default_online(),
            nginx_err: None,
            letsencrypt_agree: false,
            dns_challenge: false,
        }
    }
}

/// TLS state of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SslStatus {
    /// No certificate.
    Disabled,
    /// Certificate attached, plain HTTP still served.
    Enabled,
    /// Certificate attached and HTTPS enforced.
    Forced,
}

impl SslStatus {
    /// Filter value for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Enabled => "enabled",
            Self::Forced => "forced",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disabled => "HTTP only",
            Self::Enabled => "HTTPS",
            Self::Forced => "HTTPS (forced)",
        }
    }
}

/// Serving state of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostStatus {
    /// Enabled and served.
    Online,
    /// Enabled, but the proxy failed to load its configuration.
    Offline,
    /// Switched off.
    Disabled,
}

impl HostStatus {
    /// Filter value for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Disabled => "disabled",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Disabled => "Disabled",
        }
    }
}

/// Behaviour shared by every host-like record.
pub trait HostLike: GridRow + Send + Sync + 'static {
    /// Served domain names, in configured order.
    fn domain_names(&self) -> &[String];

    /// Attached certificate id; `0` when none.
    fn certificate_id(&self) -> i64;

    /// Whether HTTPS is enforced.
    fn ssl_forced(&self) -> bool;

    /// Whether the host is switched on.
    fn is_enabled(&self) -> bool;

    /// Proxy runtime state.
    fn meta(&self) -> &HostMeta;

    /// Switch the host on or off.
    fn set_enabled(&mut self, enabled: bool);

    /// First domain name, or an empty string.
    fn primary_domain(&self) -> &str {
        self.domain_names().first().map(String::as_str).unwrap_or_default()
    }

    fn ssl_status(&self) -> SslStatus {
        match (self.certificate_id() > 0, self.ssl_forced()) {
            (false, _) => SslStatus::Disabled,
            (true, false) => SslStatus::Enabled,
            (true, true) => SslStatus::Forced,
        }
    }

    fn status(&self) -> HostStatus {
        if !self.is_enabled() {
            HostStatus::Disabled
        } else if self.meta().nginx_online {
            HostStatus::Online
        } else {
            HostStatus::Offline
        }
    }
}

/// Reference to the access list guarding a proxy host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessListRef {
    pub id: i64,
    pub name: String,
}

/// A reverse-proxied host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyHost {
    pub id: i64,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub modified_on: Option<DateTime<Utc>>,
    pub domain_names: Vec<String>,
    pub forward_scheme: String,
    pub forward_host: String,
    pub forward_port: u16,
    #[serde(default)]
    pub access_list_id: i64,
    #[serde(default)]
    pub certificate_id: i64,
    #[serde(default)]
    pub ssl_forced: bool,
    #[serde(default)]
    pub caching_enabled: bool,
    #[serde(default)]
    pub block_exploits: bool,
    #[serde(default)]
    pub allow_websocket_upgrade: bool,
    #[serde(default)]
    pub http2_support: bool,
    pub enabled: bool,
    #[serde(default)]
    pub meta: HostMeta,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub access_list: Option<AccessListRef>,
}

impl ProxyHost {
    /// Upstream address, e.g. `http://10.0.0.5:8080`.
    pub fn destination(&self) -> String {
        format!("{}://{}:{}", self.forward_scheme, self.forward_host, self.forward_port)
    }

    /// Access list name, or `"Public"` when the host is unrestricted.
    pub fn access_label(&self) -> &str {
        match &self.access_list {
            Some(list) if self.access_list_id > 0 => &list.name,
            _ => "Public",
        }
    }
}

impl GridRow for ProxyHost {
    fn key(&self) -> RowKey {
        RowKey::Int(self.id)
    }
}

impl HostLike for ProxyHost {
    fn domain_names(&self) -> &[String] {
        &self.domain_names
    }

    fn certificate_id(&self) -> i64 {
        self.certificate_id
    }

    fn ssl_forced(&self) -> bool {
        self.ssl_forced
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn meta(&self) -> &HostMeta {
        &self.meta
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A host answering every request with an HTTP redirect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectionHost {
    pub id: i64,
    pub created_on: DateTime<Utc>,
    #[serde(default)]
    pub modified_on: Option<DateTime<Utc>>,
    pub domain_names: Vec<String>,
    /// Redirect status code; unset on records created before it was configurable.
    #[serde(default)]
    pub forward_http_code: Option<u16>,
    pub forward_scheme: String,
    pub forward_domain_name: String,
    #[serde(default)]
    pub preserve_path: bool,
    #[serde(default)]
    pub certificate_id: i64,
    #[serde(default)]
    pub ssl_forced: bool,
    pub enabled: bool,
    #[serde(default)]
    pub meta: HostMeta,
    #[serde(default)]
    pub owner: Option<Owner>,
}

impl RedirectionHost {
    /// Redirect target, e.g. `https://example.org`. `auto` schemes keep the
    /// request scheme and are shown without one.
    pub fn destination(&self) -> String {
        if self.forward_scheme == "auto" {
            self.forward_domain_name.clone()
        } else {
            format!("{}://{}", self.forward_scheme, self.forward_domain_name)
        }
    }
}

impl GridRow for RedirectionHost {
    fn key(&self) -> RowKey {
        RowKey::Int(self.id)
    }
}

impl HostLike for RedirectionHost {
    fn domain_names(&self) -> &[String] {
        &self.domain_names
    }

    fn certificate_id(&self) -> i64 {
        self.certificate_id
    }

    fn ssl_forced(&self) -> bool {
        self.ssl_forced
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn meta(&self) -> &HostMeta {
        &self.meta
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
