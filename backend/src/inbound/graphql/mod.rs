//! GraphQL inbound adapter.
//!
//! Purpose: expose the user directory through an async-graphql schema and
//! mount it on actix-web. `POST` on the configured path executes operations,
//! `GET` serves GraphiQL.

pub mod error;
pub mod schema;
pub mod types;

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Resource, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

pub use schema::{MutationRoot, QueryRoot, UserDirectorySchema, build_schema};

/// Execute a GraphQL request against the shared schema.
pub async fn graphql_handler(
    schema: web::Data<UserDirectorySchema>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

/// Resource serving the schema at `path`.
///
/// The schema itself is expected as `web::Data<UserDirectorySchema>` app
/// data.
pub fn resource(path: &str) -> Resource {
    let page = GraphiQLSource::build().endpoint(path).finish();
    web::resource(path)
        .route(web::post().to(graphql_handler))
        .route(web::get().to(move || {
            let page = page.clone();
            async move {
                HttpResponse::Ok()
                    .insert_header(ContentType::html())
                    .body(page)
            }
        }))
}
