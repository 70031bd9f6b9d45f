//! Gateway configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `GATEWAY_*` environment variables or
//! a configuration file, in the precedence OrthoConfig applies. Every field
//! is optional; accessors fall back to defaults that match a local
//! development setup with the directory on port 3000.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_UPSTREAM_URL: &str = "http://localhost:3000";
const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;

/// Errors raised when configured values cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The listen host is not an IP address.
    #[error("invalid listen host `{host}`: expected an IP address")]
    InvalidHost { host: String },
    /// The upstream base URL failed to parse.
    #[error("invalid upstream url `{url}`: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },
    /// A zero timeout would fail every upstream call.
    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,
}

/// Runtime settings for the gateway.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// Address to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// Base URL of the REST person directory, without the `/persons` suffix.
    pub upstream_url: Option<String>,
    /// Per-request timeout for upstream calls, in milliseconds.
    pub upstream_timeout_ms: Option<u64>,
    /// Serve the GraphiQL explorer on `GET /graphql`.
    #[ortho_config(default = false)]
    pub playground: bool,
}

impl GatewaySettings {
    /// Return the socket address to bind, falling back to `0.0.0.0:4000`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Return the upstream base URL, falling back to `http://localhost:3000`.
    pub fn upstream_url(&self) -> Result<Url, SettingsError> {
        let raw = self.upstream_url.as_deref().unwrap_or(DEFAULT_UPSTREAM_URL);
        Url::parse(raw).map_err(|error| SettingsError::InvalidUpstreamUrl {
            url: raw.to_owned(),
            reason: error.to_string(),
        })
    }

    /// Return the upstream request timeout, falling back to ten seconds.
    pub fn upstream_timeout(&self) -> Result<Duration, SettingsError> {
        match self.upstream_timeout_ms.unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_MS) {
            0 => Err(SettingsError::ZeroTimeout),
            millis => Ok(Duration::from_millis(millis)),
        }
    }
}
