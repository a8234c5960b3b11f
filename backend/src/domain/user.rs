//! User data model.
//!
//! [`UserCandidate`] is what clients send, [`NewUser`] is what survives
//! validation and normalisation, and [`User`] is what the datasource stores
//! once it has assigned an identifier.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by the user primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The role literal was not `true` or `false`.
    #[error("role must be `true` or `false`")]
    InvalidRole,
}

/// Opaque identifier assigned by the datasource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static ROLE_RE: OnceLock<Regex> = OnceLock::new();

fn role_regex() -> &'static Regex {
    ROLE_RE.get_or_init(|| {
        Regex::new("(?i)^(true|false)$")
            .unwrap_or_else(|error| panic!("role regex failed to compile: {error}"))
    })
}

/// Role flag carried by every user.
///
/// Clients submit it as a boolean literal, either a JSON/GraphQL boolean or
/// a string matched case-insensitively against `true` / `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(from = "bool", into = "bool")]
#[schema(value_type = bool)]
pub struct Role(bool);

impl Role {
    /// Parse a role literal.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::Role;
    ///
    /// assert_eq!(Role::parse("TRUE").map(bool::from), Ok(true));
    /// assert!(Role::parse("yes").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        if !role_regex().is_match(raw) {
            return Err(UserValidationError::InvalidRole);
        }
        Ok(Self(raw.eq_ignore_ascii_case("true")))
    }
}

impl From<bool> for Role {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<Role> for bool {
    fn from(value: Role) -> Self {
        value.0
    }
}

/// Persisted user record.
///
/// # Examples
/// ```
/// use user_directory::domain::{NewUser, Role, User, UserId};
///
/// let new_user = NewUser {
///     name: "Ada".into(),
///     email: "ada@example.com".into(),
///     address: "1 Analytical Way".into(),
///     role: Role::from(true),
/// };
/// let user = User::from_new(UserId::new("u-1").expect("id"), new_user);
/// assert_eq!(user.id.as_ref(), "u-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Datasource-assigned identifier.
    pub id: UserId,
    #[schema(example = "Alverta Lang")]
    pub name: String,
    #[schema(example = "Tillman.Rice@yahoo.com")]
    pub email: String,
    #[schema(example = "51405 Zemlak Viaduct, Lake Alex 08214")]
    pub address: String,
    pub role: Role,
}

impl User {
    /// Assemble a stored record from its assigned id and validated payload.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            name,
            email,
            address,
            role,
        } = new_user;
        Self {
            id,
            name,
            email,
            address,
            role,
        }
    }
}

/// Validated, normalised payload ready for [`UserDatasource::add`].
///
/// [`UserDatasource::add`]: crate::domain::ports::UserDatasource::add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub address: String,
    pub role: Role,
}

/// Untrusted user payload as submitted by a client.
///
/// Every field is optional so the validator can report each missing field
/// rather than failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCandidate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Raw role literal, before parsing.
    pub role: Option<String>,
}

/// Lookup filter for datasource reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    pub name: String,
}

impl UserFilter {
    /// Filter on an exact name match.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
