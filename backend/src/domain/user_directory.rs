//! User directory use-cases shared by the REST and GraphQL adapters.
//!
//! Each operation is single-shot: validate, normalise, call the datasource
//! once, then map the outcome. Validation always runs before the datasource
//! is touched, so a rejected payload never causes a partial write.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use super::normalize::normalize;
use super::ports::{DatasourceError, UserDatasource};
use super::validation::validate;
use super::{Error, User, UserCandidate, UserFilter, UserId};

/// Page size used by `list_users` when the caller gives none.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Message returned by the REST add path for any validation failure.
pub const INVALID_USER_DATA: &str = "invalid user data";

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserOutcome {
    pub success: bool,
    pub user: User,
}

/// Result of a remove call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveUserOutcome {
    pub success: bool,
    pub message: String,
}

/// Orchestrates user operations against a [`UserDatasource`].
///
/// The datasource handle is shared read-only by every request.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use user_directory::domain::UserDirectoryService;
/// use user_directory::outbound::memory::InMemoryUserDatasource;
///
/// let service = UserDirectoryService::new(Arc::new(InMemoryUserDatasource::new()));
/// let _clone = service.clone();
/// ```
#[derive(Clone)]
pub struct UserDirectoryService {
    datasource: Arc<dyn UserDatasource>,
}

impl UserDirectoryService {
    /// Build the service around a datasource resolved at startup.
    pub fn new(datasource: Arc<dyn UserDatasource>) -> Self {
        Self { datasource }
    }

    /// Look up a single user by name.
    ///
    /// A datasource miss surfaces as [`ErrorCode::InvalidRequest`].
    ///
    /// [`ErrorCode::InvalidRequest`]: super::ErrorCode::InvalidRequest
    pub async fn get_user(&self, name: &str) -> Result<User, Error> {
        debug!(operation = "get_user", name, "looking up user");
        let user = self.datasource.get(&UserFilter::by_name(name)).await?;
        Ok(user)
    }

    /// Look up a single user by name, treating a miss as `None`.
    pub async fn find_user(&self, name: &str) -> Result<Option<User>, Error> {
        debug!(operation = "find_user", name, "looking up user");
        match self.datasource.get(&UserFilter::by_name(name)).await {
            Ok(user) => Ok(Some(user)),
            Err(DatasourceError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// List users sharing `name`, returning at most `first` of them.
    ///
    /// `first` defaults to [`DEFAULT_PAGE_SIZE`]; negative values are
    /// rejected before the datasource is called.
    pub async fn list_users(&self, name: &str, first: Option<i32>) -> Result<Vec<User>, Error> {
        let first = match first {
            None => DEFAULT_PAGE_SIZE,
            Some(value) => usize::try_from(value).map_err(|_| {
                Error::invalid_request("first must not be negative")
                    .with_details(json!({ "field": "first", "value": value }))
            })?,
        };
        debug!(operation = "list_users", name, first, "listing users");
        if first == 0 {
            return Ok(Vec::new());
        }

        let mut users = self
            .datasource
            .get_users(&UserFilter::by_name(name), Some(first))
            .await?;
        users.truncate(first);
        Ok(users)
    }

    /// Validate, normalise, and persist a new user.
    ///
    /// Every failing field is reported. Repeated calls with the same payload
    /// create distinct records.
    pub async fn create_user(&self, candidate: &UserCandidate) -> Result<CreateUserOutcome, Error> {
        let validated = validate(candidate).map_err(|errors| {
            debug!(operation = "create_user", violations = errors.iter().len(), "rejected payload");
            Error::from(errors)
        })?;
        let new_user = normalize(validated);
        let added = self.datasource.add(&new_user).await?;
        debug!(operation = "create_user", id = %added.id, "user created");
        Ok(CreateUserOutcome {
            success: true,
            user: User::from_new(added.id, new_user),
        })
    }

    /// REST variant of [`Self::create_user`] whose validation failure is a
    /// single generic rejection.
    pub async fn add_user(&self, candidate: &UserCandidate) -> Result<User, Error> {
        let validated = validate(candidate).map_err(|errors| {
            debug!(operation = "add_user", %errors, "rejected payload");
            Error::invalid_request(INVALID_USER_DATA)
        })?;
        let new_user = normalize(validated);
        let added = self.datasource.add(&new_user).await?;
        debug!(operation = "add_user", id = %added.id, "user created");
        Ok(User::from_new(added.id, new_user))
    }

    /// Remove a user by id.
    ///
    /// Unknown ids are not an error; the datasource's status message is
    /// passed through.
    pub async fn remove_user(&self, id: &str) -> Result<RemoveUserOutcome, Error> {
        let id = UserId::new(id).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "id" }))
        })?;
        let message = self.datasource.remove(&id).await.map_err(|err| {
            warn!(operation = "remove_user", %id, error = %err, "datasource remove failed");
            Error::from(err)
        })?;
        debug!(operation = "remove_user", %id, "user removed");
        Ok(RemoveUserOutcome {
            success: true,
            message,
        })
    }
}
