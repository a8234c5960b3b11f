//! Catch-all handler for requests that match no registered route.

use actix_web::{HttpRequest, HttpResponse};

use super::ApiResult;
use crate::domain::Error;

/// Reject an unmatched request with [`crate::domain::ErrorCode::NotFound`],
/// rendered as a plain-text 404.
pub async fn route_not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "no route for {} {}",
        req.method(),
        req.path()
    )))
}
