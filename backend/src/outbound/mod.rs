//! Outbound adapters implementing the [`UserDatasource`] port.
//!
//! - **memory**: in-process store for local runs and tests.
//! - **redis**: Redis store over a `bb8` connection pool.
//!
//! The backend is chosen once at startup through [`build_datasource`] and
//! handed to the domain as `Arc<dyn UserDatasource>`.

pub mod memory;
pub mod redis;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::domain::ports::{DatasourceError, UserDatasource};
use memory::InMemoryUserDatasource;
use self::redis::RedisUserDatasource;

/// Datasource implementations selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasourceKind {
    Memory,
    Redis,
}

impl DatasourceKind {
    /// Configuration name of the implementation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Redis => "redis",
        }
    }
}

impl fmt::Display for DatasourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The configured name matches no known datasource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown datasource `{0}`; expected `memory` or `redis`")]
pub struct UnknownDatasource(pub String);

impl FromStr for DatasourceKind {
    type Err = UnknownDatasource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            _ => Err(UnknownDatasource(s.to_owned())),
        }
    }
}

/// Resolve the datasource named by `kind`.
///
/// # Errors
/// Returns [`DatasourceError::Connection`] when the Redis pool cannot be
/// built.
pub async fn build_datasource(
    kind: DatasourceKind,
    redis_url: &str,
) -> Result<Arc<dyn UserDatasource>, DatasourceError> {
    info!(datasource = %kind, "initialising datasource");
    match kind {
        DatasourceKind::Memory => Ok(Arc::new(InMemoryUserDatasource::new())),
        DatasourceKind::Redis => Ok(Arc::new(RedisUserDatasource::connect(redis_url).await?)),
    }
}
