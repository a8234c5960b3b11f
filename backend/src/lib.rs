//! User directory service library.
//!
//! Layout follows ports and adapters:
//! - [`domain`]: user model, validation, normalisation, the datasource port,
//!   and the `UserDirectoryService` use-cases.
//! - [`inbound`]: REST and GraphQL adapters.
//! - [`outbound`]: in-memory and Redis datasources plus the startup factory.
//! - [`middleware`]: request tracing.
//! - [`settings`]: OrthoConfig-backed configuration.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
