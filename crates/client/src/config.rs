//! Connection settings for the HTTP delegate.
//!
//! Settings come from the caller or the environment; nothing is baked into the
//! binary.

use std::time::Duration;

use reqwest::Url;
use stockline_core::{InventoryError, InventoryResult};

pub const HOST_ENV: &str = "INVENTORY_API_HOST";
pub const CLIENT_SECRET_ENV: &str = "INVENTORY_API_CLIENT_SECRET";
pub const EMPTY_HEADER_ENV: &str = "INVENTORY_API_EMPTY_HEADER";
pub const TIMEOUT_ENV: &str = "INVENTORY_API_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Host, credential and header policy for [`crate::HttpInventoryApi`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: Url,
    client_secret: String,
    use_empty_header: bool,
    timeout: Duration,
}

impl ClientConfig {
    /// Build a config from an explicit host and secret.
    ///
    /// The host must be an absolute `http`/`https` URL; the secret must be
    /// non-empty.
    pub fn new(host: &str, client_secret: impl Into<String>) -> InventoryResult<Self> {
        let client_secret = client_secret.into();
        if client_secret.trim().is_empty() {
            return Err(InventoryError::configuration("client secret must not be empty"));
        }

        Ok(Self {
            host: parse_host(host)?,
            client_secret,
            use_empty_header: false,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read the config from the process environment.
    pub fn from_env() -> InventoryResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the config through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> InventoryResult<Self> {
        let host = lookup(HOST_ENV)
            .ok_or_else(|| InventoryError::configuration(format!("{HOST_ENV} is not set")))?;
        let secret = lookup(CLIENT_SECRET_ENV).ok_or_else(|| {
            InventoryError::configuration(format!("{CLIENT_SECRET_ENV} is not set"))
        })?;

        let mut config = Self::new(&host, secret)?;

        if let Some(raw) = lookup(EMPTY_HEADER_ENV) {
            config.use_empty_header = parse_bool(EMPTY_HEADER_ENV, &raw)?;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                InventoryError::configuration(format!(
                    "{TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs))?;
        }

        Ok(config)
    }

    pub fn with_empty_header(mut self, use_empty_header: bool) -> Self {
        self.use_empty_header = use_empty_header;
        self
    }

    /// Set the request timeout; a zero timeout is rejected.
    pub fn with_timeout(mut self, timeout: Duration) -> InventoryResult<Self> {
        if timeout.is_zero() {
            return Err(InventoryError::configuration(format!(
                "{TIMEOUT_ENV} must be greater than zero"
            )));
        }
        self.timeout = timeout;
        Ok(self)
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn use_empty_header(&self) -> bool {
        self.use_empty_header
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl core::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host.as_str())
            .field("client_secret", &"<redacted>")
            .field("use_empty_header", &self.use_empty_header)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_host(raw: &str) -> InventoryResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| {
        InventoryError::configuration(format!("invalid inventory host '{raw}': {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(InventoryError::configuration(format!(
            "inventory host must use http or https; got '{}://'",
            url.scheme()
        )));
    }
    if url.host_str().is_none() || url.cannot_be_a_base() {
        return Err(InventoryError::configuration(format!(
            "inventory host '{raw}' must include a host name"
        )));
    }

    Ok(url)
}

fn parse_bool(name: &str, raw: &str) -> InventoryResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(InventoryError::configuration(format!(
            "{name} must be a boolean, got '{raw}'"
        ))),
    }
}
