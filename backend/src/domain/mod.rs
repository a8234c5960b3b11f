//! Domain types, validation, and use-cases.
//!
//! Purpose: keep user directory rules independent of HTTP, GraphQL, and the
//! concrete datasource. Adapters depend on this module; it depends on none
//! of them.
//!
//! Public surface:
//! - `User`, `NewUser`, `UserCandidate`, `UserId`, `Role`, `UserFilter`.
//! - `validation` (Validator) and `normalize` (Normalizer).
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `UserDirectoryService`: the per-operation orchestration.
//! - `ports::UserDatasource`: the pluggable store capability.

pub mod error;
pub mod normalize;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_directory;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, Role, User, UserCandidate, UserFilter, UserId, UserValidationError};
pub use self::user_directory::{
    CreateUserOutcome, DEFAULT_PAGE_SIZE, INVALID_USER_DATA, RemoveUserOutcome,
    UserDirectoryService,
};
pub use self::validation::{FieldViolation, UserField, ValidationErrors, ViolationCode};
