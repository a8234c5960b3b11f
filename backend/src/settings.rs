//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SIM_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence. They are read once
//! in `main` and passed down explicitly.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::{DatasourceKind, UnknownDatasource};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GQL_PATH: &str = "/graphql";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{0}`")]
    InvalidBindAddr(String),
    #[error(transparent)]
    UnknownDatasource(#[from] UnknownDatasource),
}

/// Server and datasource settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SIM")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base path the GraphQL endpoint is mounted on.
    pub gql_path: Option<String>,
    /// Datasource implementation name (`memory` or `redis`).
    pub datasource: Option<String>,
    /// Connection URL used by the Redis datasource.
    pub redis_url: Option<String>,
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|_| SettingsError::InvalidBindAddr(raw.to_owned()))
    }

    /// GraphQL mount path with a single leading slash.
    pub fn gql_path(&self) -> String {
        let raw = self
            .gql_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty() && *path != "/")
            .unwrap_or(DEFAULT_GQL_PATH);
        format!("/{}", raw.trim_start_matches('/'))
    }

    /// Selected datasource, falling back to the in-memory store.
    pub fn datasource_kind(&self) -> Result<DatasourceKind, SettingsError> {
        match self.datasource.as_deref() {
            None => Ok(DatasourceKind::Memory),
            Some(name) => Ok(name.parse()?),
        }
    }

    /// Redis URL, falling back to a local instance.
    pub fn redis_url(&self) -> &str {
        self.redis_url.as_deref().unwrap_or(DEFAULT_REDIS_URL)
    }
}
