//! Shared helpers for the HTTP-level integration tests.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use user_directory::Trace;
use user_directory::domain::ports::UserDatasource;
use user_directory::domain::{Role, User, UserDirectoryService, UserId};
use user_directory::inbound::graphql::{self, build_schema};
use user_directory::inbound::http::state::HttpState;
use user_directory::inbound::http::users::{add_user, get_user, json_config, remove_user};
use user_directory::outbound::memory::InMemoryUserDatasource;

pub const GRAPHQL_PATH: &str = "/graphql";

/// `count` records sharing `name`.
pub fn users_named(name: &str, count: usize) -> Vec<User> {
    (0..count)
        .map(|n| User {
            id: UserId::new(format!("{name}-{n}")).expect("fixture id"),
            name: name.to_owned(),
            email: format!("user{n}@example.com"),
            address: format!("{n} Main Street"),
            role: Role::from(n % 2 == 0),
        })
        .collect()
}

pub fn seeded_datasource(users: Vec<User>) -> Arc<dyn UserDatasource> {
    Arc::new(InMemoryUserDatasource::with_users(users))
}

/// Initialise the REST and GraphQL routes around `datasource`.
pub async fn init_app(
    datasource: Arc<dyn UserDatasource>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let service = UserDirectoryService::new(datasource);
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(service.clone())))
            .app_data(web::Data::new(build_schema(service)))
            .app_data(json_config())
            .wrap(Trace)
            .service(add_user)
            .service(remove_user)
            .service(get_user)
            .service(graphql::resource(GRAPHQL_PATH)),
    )
    .await
}

/// POST a GraphQL operation and decode the JSON response.
pub async fn graphql<S>(app: &S, query: &str, variables: Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri(GRAPHQL_PATH)
        .set_json(json!({ "query": query, "variables": variables }))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

/// Extension codes of every error in a GraphQL response, in order.
pub fn error_codes(response: &Value) -> Vec<String> {
    response["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["extensions"]["code"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}
