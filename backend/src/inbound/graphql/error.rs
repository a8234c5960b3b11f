//! Mapping from domain errors to GraphQL errors.
//!
//! Every error carries `extensions.code`:
//! - `invalid_request` and `not_found` become `BAD_USER_INPUT`.
//! - `service_unavailable` and `internal_error` become
//!   `INTERNAL_SERVER_ERROR`; internal messages are redacted.
//!
//! Validation failures expand to one GraphQL error per violated field, each
//! with `extensions.field`.

use async_graphql::{Error as GraphqlError, ErrorExtensions};
use serde_json::Value;
use tracing::error;

use crate::domain::{Error, ErrorCode};

pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

const REDACTED_MESSAGE: &str = "Internal server error";

fn extension_code(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::NotFound => BAD_USER_INPUT,
        ErrorCode::ServiceUnavailable | ErrorCode::InternalError => INTERNAL_SERVER_ERROR,
    }
}

fn violation_error(violation: &Value, trace_id: Option<&str>) -> GraphqlError {
    let field = violation.get("field").and_then(Value::as_str).unwrap_or_default();
    let message = violation
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("invalid value");
    let reason = violation.get("code").and_then(Value::as_str).unwrap_or_default();
    GraphqlError::new(message).extend_with(|_, ext| {
        ext.set("code", BAD_USER_INPUT);
        ext.set("field", field);
        ext.set("reason", reason);
        if let Some(id) = trace_id {
            ext.set("traceId", id);
        }
    })
}

/// Convert a domain error into one or more GraphQL errors.
///
/// The result is never empty.
pub fn graphql_errors(err: &Error) -> Vec<GraphqlError> {
    if let Some(violations) = err.violations().filter(|v| !v.is_empty()) {
        return violations
            .iter()
            .map(|violation| violation_error(violation, err.trace_id()))
            .collect();
    }

    let message = match err.code() {
        ErrorCode::InternalError => {
            error!(message = err.message(), trace_id = ?err.trace_id(), "internal error");
            REDACTED_MESSAGE
        }
        _ => err.message(),
    };
    let field = err
        .details()
        .and_then(|details| details.get("field"))
        .and_then(Value::as_str);
    let code = extension_code(err.code());
    vec![GraphqlError::new(message).extend_with(|_, ext| {
        ext.set("code", code);
        if let Some(field) = field {
            ext.set("field", field);
        }
        if let Some(id) = err.trace_id() {
            ext.set("traceId", id);
        }
    })]
}

/// Convert a domain error into the single error returned by a resolver.
pub fn graphql_error(err: &Error) -> GraphqlError {
    graphql_errors(err)
        .into_iter()
        .next()
        .unwrap_or_else(|| GraphqlError::new(REDACTED_MESSAGE))
}
