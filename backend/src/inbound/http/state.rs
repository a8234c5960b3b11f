//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they only depend on the
//! domain service and stay testable with a mocked datasource.

use crate::domain::UserDirectoryService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UserDirectoryService,
}

impl HttpState {
    pub fn new(users: UserDirectoryService) -> Self {
        Self { users }
    }
}
