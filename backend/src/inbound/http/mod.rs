//! HTTP inbound adapter exposing the REST endpoints.
//!
//! Handlers stay thin: decode the request, call [`UserDirectoryService`],
//! encode the response. Failures travel as the domain [`Error`] and are
//! rendered by its `ResponseError` impl in [`error`].
//!
//! [`UserDirectoryService`]: crate::domain::UserDirectoryService
//! [`Error`]: crate::domain::Error

pub mod error;
pub mod fallback;
pub mod health;
pub mod state;
pub mod users;

pub use error::ApiResult;
