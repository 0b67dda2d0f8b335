//! Server settings loaded via OrthoConfig.
//!
//! Values come from `TRACKER_*` environment variables or the matching
//! command-line flags (`--port`, `--bind-host`, `--database-url`,
//! `--pool-max-size`). When no tracker port is given, the platform's `PORT`
//! variable is honoured before falling back to 3000.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3000;

/// Port variable injected by hosting platforms.
pub const HOST_PORT_VAR: &str = "PORT";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_host` is not an IP address.
    #[error("invalid bind host {value:?}: expected an IP address")]
    InvalidBindHost { value: String },
    /// `PORT` is not a port number.
    #[error("invalid PORT {value:?}: expected a port number")]
    InvalidHostPort { value: String },
}

/// Settings for the tracker server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct ServerSettings {
    /// Port to listen on; takes precedence over `PORT`.
    pub port: Option<u16>,
    /// Address to bind; defaults to all interfaces.
    pub bind_host: Option<String>,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl ServerSettings {
    /// Socket address assembled from `bind_host` and the resolved port.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindHost`] when `bind_host` is not an
    /// IP address and [`SettingsError::InvalidHostPort`] when the `PORT`
    /// fallback is not a port number.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr_with(std::env::var(HOST_PORT_VAR).ok().as_deref())
    }

    /// As [`Self::bind_addr`], with the `PORT` value supplied by the caller.
    ///
    /// # Errors
    ///
    /// See [`Self::bind_addr`].
    pub fn bind_addr_with(&self, host_port: Option<&str>) -> Result<SocketAddr, SettingsError> {
        let host = match self.bind_host.as_deref() {
            None => DEFAULT_BIND_HOST,
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidBindHost {
                    value: raw.to_owned(),
                })?,
        };
        Ok(SocketAddr::new(host, self.resolve_port(host_port)?))
    }

    fn resolve_port(&self, host_port: Option<&str>) -> Result<u16, SettingsError> {
        if let Some(port) = self.port {
            return Ok(port);
        }
        match host_port.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => Ok(DEFAULT_PORT),
            Some(raw) => raw.parse().map_err(|_| SettingsError::InvalidHostPort {
                value: raw.to_owned(),
            }),
        }
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
