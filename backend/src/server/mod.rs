//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use user_directory::Trace;
#[cfg(debug_assertions)]
use user_directory::doc::ApiDoc;
use user_directory::domain::UserDirectoryService;
use user_directory::inbound::graphql::{self, UserDirectorySchema, build_schema};
use user_directory::inbound::http::fallback::route_not_found;
use user_directory::inbound::http::health::{HealthState, live, ready};
use user_directory::inbound::http::state::HttpState;
use user_directory::inbound::http::users::{add_user, get_user, json_config, remove_user};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    schema: web::Data<UserDirectorySchema>,
    gql_path: String,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        schema,
        gql_path,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(schema)
        .app_data(json_config())
        .wrap(Trace)
        .service(add_user)
        .service(remove_user)
        .service(get_user)
        .service(graphql::resource(&gql_path))
        .service(ready)
        .service(live)
        .default_service(web::to(route_not_found));

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from a resolved [`ServerConfig`].
///
/// The REST handlers and the GraphQL schema share one
/// [`UserDirectoryService`] built around the configured datasource.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        gql_path,
        datasource,
    } = config;
    let service = UserDirectoryService::new(datasource);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(HttpState::new(service.clone())),
        schema: web::Data::new(build_schema(service)),
        gql_path,
    };
    info!(%bind_addr, gql_path = %deps.gql_path, "starting HTTP server");

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use user_directory::outbound::memory::InMemoryUserDatasource;

    fn deps(gql_path: &str) -> AppDependencies {
        let service = UserDirectoryService::new(Arc::new(InMemoryUserDatasource::new()));
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(HttpState::new(service.clone())),
            schema: web::Data::new(build_schema(service)),
            gql_path: gql_path.to_owned(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn graphql_is_mounted_on_configured_path() {
        let app = test::init_service(build_app(deps("/api/gql"))).await;
        let req = test::TestRequest::post()
            .uri("/api/gql")
            .set_json(json!({ "query": "{ __typename }" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("trace-id"));
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["data"]["__typename"], "QueryRoot");
    }

    #[rstest]
    #[actix_web::test]
    async fn rest_and_graphql_share_the_datasource() {
        let app = test::init_service(build_app(deps("/graphql"))).await;
        let req = test::TestRequest::post()
            .uri("/add")
            .set_json(json!({
                "name": "Ada",
                "email": "ada@example.com",
                "address": "1 Main St",
                "role": "false"
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/graphql")
            .set_json(json!({ "query": r#"{ user(name: "Ada") { email role } }"# }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["user"], json!({ "email": "ada@example.com", "role": false }));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_routes_are_not_found() {
        let app = test::init_service(build_app(deps("/graphql"))).await;
        let req = test::TestRequest::get().uri("/users/everyone").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(res.headers().contains_key("trace-id"));
        let body = test::read_body(res).await;
        assert_eq!(body.as_ref(), b"no route for GET /users/everyone");
    }

    #[rstest]
    #[actix_web::test]
    async fn health_endpoints_are_served() {
        let app = test::init_service(build_app(deps("/graphql"))).await;
        let req = test::TestRequest::get().uri("/health/ready").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
