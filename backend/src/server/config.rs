//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use user_directory::domain::ports::UserDatasource;

/// Everything the server needs once settings and the datasource are resolved.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) gql_path: String,
    pub(crate) datasource: Arc<dyn UserDatasource>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        gql_path: impl Into<String>,
        datasource: Arc<dyn UserDatasource>,
    ) -> Self {
        Self {
            bind_addr,
            gql_path: gql_path.into(),
            datasource,
        }
    }
}
