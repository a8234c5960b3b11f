//! In-process datasource backed by a vector of users.
//!
//! Used for local runs and tests. Records keep insertion order so list
//! lookups are deterministic.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{AddedUser, DatasourceError, UserDatasource};
use crate::domain::{NewUser, User, UserFilter, UserId};

/// Datasource holding users in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserDatasource {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserDatasource {
    /// Create an empty datasource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a datasource pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    fn mint_id() -> Result<UserId, DatasourceError> {
        UserId::new(Uuid::new_v4().to_string())
            .map_err(|err| DatasourceError::query(err.to_string()))
    }
}

#[async_trait]
impl UserDatasource for InMemoryUserDatasource {
    async fn get(&self, filter: &UserFilter) -> Result<User, DatasourceError> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|user| user.name == filter.name)
            .cloned()
            .ok_or_else(|| DatasourceError::not_found(filter.name.as_str()))
    }

    async fn get_users(
        &self,
        filter: &UserFilter,
        limit: Option<usize>,
    ) -> Result<Vec<User>, DatasourceError> {
        if limit == Some(0) {
            return Ok(Vec::new());
        }
        let users = self.users.read().await;
        let matches: Vec<User> = users
            .iter()
            .filter(|user| user.name == filter.name)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        if matches.is_empty() {
            return Err(DatasourceError::not_found(filter.name.as_str()));
        }
        Ok(matches)
    }

    async fn add(&self, user: &NewUser) -> Result<AddedUser, DatasourceError> {
        let id = Self::mint_id()?;
        let record = User::from_new(id.clone(), user.clone());
        self.users.write().await.push(record);
        Ok(AddedUser { id })
    }

    async fn remove(&self, id: &UserId) -> Result<String, DatasourceError> {
        let mut users = self.users.write().await;
        users.retain(|user| &user.id != id);
        Ok(format!("Removed {id}"))
    }
}
