//! OpenAPI documentation for the REST surface.
//!
//! The GraphQL endpoint describes itself through introspection and is not
//! part of this document. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::User;
use crate::inbound::http::users::{AddUserRequest, RemoveUserRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "CRUD access to user records and health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::add_user,
        crate::inbound::http::users::remove_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, AddUserRequest, RemoveUserRequest)),
    tags(
        (name = "users", description = "User record operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/add")]
    #[case("/remove")]
    #[case("/get")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_rest_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn user_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("User"));
        assert!(schemas.contains_key("AddUserRequest"));
    }
}
