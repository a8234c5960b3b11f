//! User CRUD handlers.
//!
//! ```text
//! POST   /add            {"name":"Ada","email":"ada@example.com","address":"1 Main St","role":"true"}
//! DELETE /remove         {"id":"…"}
//! GET    /get?name=Ada
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, delete, error::JsonPayloadError, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, INVALID_USER_DATA, User, UserCandidate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Candidate user accepted by `POST /add`.
///
/// Every field is optional at the wire level so the validator, not the JSON
/// decoder, decides what is missing. `role` may be a boolean or a string.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub role: Option<Value>,
}

/// Textual form of a submitted role; non-string values are rendered as JSON
/// so the validator rejects them by content.
fn role_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

impl From<AddUserRequest> for UserCandidate {
    fn from(value: AddUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            address: value.address,
            role: value.role.and_then(role_text),
        }
    }
}

/// Body of `DELETE /remove`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RemoveUserRequest {
    pub id: String,
}

/// Query string of `GET /get`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetUserQuery {
    /// Exact name to look up.
    pub name: String,
}

/// JSON extractor configuration for user payloads.
///
/// Undecodable bodies surface as the generic `invalid user data` rejection.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        debug!(error = %err, "rejected undecodable user payload");
        Error::invalid_request(INVALID_USER_DATA).into()
    })
}

/// Create a user from a candidate payload.
///
/// Any validation failure yields `400 invalid user data`.
#[utoipa::path(
    post,
    path = "/add",
    request_body = AddUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid user data", body = String, content_type = "text/plain"),
        (status = 503, description = "Datasource unavailable", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "addUser"
)]
#[post("/add")]
pub async fn add_user(
    state: web::Data<HttpState>,
    payload: web::Json<AddUserRequest>,
) -> ApiResult<HttpResponse> {
    let candidate = UserCandidate::from(payload.into_inner());
    let user = state.users.add_user(&candidate).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Remove a user by id and return the datasource status message.
#[utoipa::path(
    delete,
    path = "/remove",
    request_body = RemoveUserRequest,
    responses(
        (status = 200, description = "Status message", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid request", body = String, content_type = "text/plain"),
        (status = 503, description = "Datasource unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "removeUser"
)]
#[delete("/remove")]
pub async fn remove_user(
    state: web::Data<HttpState>,
    payload: web::Json<RemoveUserRequest>,
) -> ApiResult<HttpResponse> {
    let outcome = state.users.remove_user(&payload.id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .body(outcome.message))
}

/// Fetch the first user with the given name, or `null` when none exists.
#[utoipa::path(
    get,
    path = "/get",
    params(GetUserQuery),
    responses(
        (status = 200, description = "Matching user, or null when none exists", body = User),
        (status = 503, description = "Datasource unavailable", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/get")]
pub async fn get_user(
    state: web::Data<HttpState>,
    query: web::Query<GetUserQuery>,
) -> ApiResult<web::Json<Option<User>>> {
    let user = state.users.find_user(&query.name).await?;
    Ok(web::Json(user))
}
