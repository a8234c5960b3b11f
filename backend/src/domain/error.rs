//! Transport-agnostic error type for user directory operations.
//!
//! Inbound adapters decide how each [`ErrorCode`] surfaces: the REST adapter
//! maps codes to HTTP status lines while the GraphQL adapter maps them to
//! `extensions.code` values.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::TraceId;
use super::ports::DatasourceError;
use super::validation::ValidationErrors;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed, fails validation, or names a record that
    /// does not exist.
    InvalidRequest,
    /// The addressed route or resource does not exist.
    NotFound,
    /// A backing dependency such as the datasource is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Error payload shared by every use-case.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `trace_id`, when present, is the request's trace identifier.
///
/// # Examples
/// ```
/// use user_directory::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("missing name");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "missing name");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation failures raised by the fallible constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was empty after trimming.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if the message is blank.
    ///
    /// Captures the trace identifier in scope, if any.
    ///
    /// # Panics
    /// Panics when `message` is empty after trimming. Use [`Error::try_new`]
    /// for caller-provided text.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "input": "bob" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Ordered field violations when this error came from input validation.
    pub fn violations(&self) -> Option<&Vec<Value>> {
        self.details
            .as_ref()
            .and_then(|details| details.get("violations"))
            .and_then(Value::as_array)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// A lookup miss is a bad-input condition from the caller's point of view,
/// so it maps to [`ErrorCode::InvalidRequest`] rather than a server fault.
impl From<DatasourceError> for Error {
    fn from(err: DatasourceError) -> Self {
        match err {
            DatasourceError::NotFound { input } => {
                Self::invalid_request(format!("no user matches: {input}"))
                    .with_details(json!({ "input": input }))
            }
            DatasourceError::Connection { message } => Self::try_new(
                ErrorCode::ServiceUnavailable,
                message,
            )
            .unwrap_or_else(|_| Self::service_unavailable("datasource unavailable")),
            DatasourceError::Query { message } => Self::try_new(ErrorCode::InternalError, message)
                .unwrap_or_else(|_| Self::internal("datasource query failed")),
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        let message = format!("invalid user input: {errors}");
        let violations: Vec<Value> = errors
            .iter()
            .map(|violation| {
                json!({
                    "field": violation.field().as_str(),
                    "code": violation.code().as_str(),
                    "message": violation.message(),
                })
            })
            .collect();
        Self::invalid_request(message).with_details(json!({ "violations": violations }))
    }
}
