//! Driven port for the backing user store.
//!
//! The resolver layer depends only on this trait; concrete stores live in
//! `crate::outbound` and are selected once at startup.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserFilter, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by datasource adapters.
    pub enum DatasourceError {
        /// No record matches the lookup filter.
        NotFound { input: String } => "no user found for {input}",
        /// The store could not be reached.
        Connection { message: String } => "datasource connection failed: {message}",
        /// A read or write failed while executing.
        Query { message: String } => "datasource query failed: {message}",
    }
}

/// Acknowledgement returned by [`UserDatasource::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedUser {
    pub id: UserId,
}

/// Capability set of a pluggable user store.
///
/// Lookups key on `name`; several records may share one. Removal keys on
/// the datasource-assigned id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDatasource: Send + Sync {
    /// Fetch the first user matching `filter`.
    ///
    /// Returns [`DatasourceError::NotFound`] when nothing matches.
    async fn get(&self, filter: &UserFilter) -> Result<User, DatasourceError>;

    /// Fetch users matching `filter` in insertion order, stopping after
    /// `limit` records when one is given.
    ///
    /// Returns [`DatasourceError::NotFound`] when nothing matches.
    async fn get_users(
        &self,
        filter: &UserFilter,
        limit: Option<usize>,
    ) -> Result<Vec<User>, DatasourceError>;

    /// Persist a new user and return its assigned id.
    async fn add(&self, user: &NewUser) -> Result<AddedUser, DatasourceError>;

    /// Delete a user by id, returning a status message.
    async fn remove(&self, id: &UserId) -> Result<String, DatasourceError>;
}
