// Procedure call error types
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One failing field reported by the schema validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Domain error codes a handler may surface verbatim to the caller.
/// Anything else a handler fails with is reported as an internal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainCode {
    BadRequest,
    Forbidden,
    Conflict,
    PreconditionFailed,
    TooManyRequests,
}

/// Error a handler returns (through `anyhow`) when it wants the caller to see it
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct DomainError {
    pub code: DomainCode,
    pub message: String,
}

impl DomainError {
    pub fn new(code: DomainCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(DomainCode::Forbidden, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(DomainCode::Conflict, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(DomainCode::BadRequest, message)
    }
}

/// Error outcome of a dispatched procedure call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    // 400 Bad Request
    BadInput {
        message: String,
        causes: Vec<FieldError>,
    },
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found (routing only, never "record not found")
    NotFound(String),

    // 405 Method Not Allowed
    MethodMismatch(String),

    // 409 Conflict
    Conflict(String),

    // 412 Precondition Failed
    PreconditionFailed(String),

    // 429 Too Many Requests
    TooManyRequests(String),

    // 500 Internal Server Error
    Internal(String),
}

impl RpcError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            RpcError::BadInput { .. } => StatusCode::BAD_REQUEST,
            RpcError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RpcError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RpcError::Forbidden(_) => StatusCode::FORBIDDEN,
            RpcError::NotFound(_) => StatusCode::NOT_FOUND,
            RpcError::MethodMismatch(_) => StatusCode::METHOD_NOT_ALLOWED,
            RpcError::Conflict(_) => StatusCode::CONFLICT,
            RpcError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            RpcError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            RpcError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            RpcError::BadInput { message, .. } => message,
            RpcError::BadRequest(msg) => msg,
            RpcError::Unauthorized(msg) => msg,
            RpcError::Forbidden(msg) => msg,
            RpcError::NotFound(msg) => msg,
            RpcError::MethodMismatch(msg) => msg,
            RpcError::Conflict(msg) => msg,
            RpcError::PreconditionFailed(msg) => msg,
            RpcError::TooManyRequests(msg) => msg,
            RpcError::Internal(msg) => msg,
        }
    }

    /// Stable error kind string for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RpcError::BadInput { .. } => "BAD_INPUT",
            RpcError::BadRequest(_) => "BAD_REQUEST",
            RpcError::Unauthorized(_) => "UNAUTHORIZED",
            RpcError::Forbidden(_) => "FORBIDDEN",
            RpcError::NotFound(_) => "NOT_FOUND",
            RpcError::MethodMismatch(_) => "METHOD_MISMATCH",
            RpcError::Conflict(_) => "CONFLICT",
            RpcError::PreconditionFailed(_) => "PRECONDITION_FAILED",
            RpcError::TooManyRequests(_) => "TOO_MANY_REQUESTS",
            RpcError::Internal(_) => "INTERNAL",
        }
    }

    /// Per-field causes, only present for input validation failures
    pub fn causes(&self) -> Option<&[FieldError]> {
        match self {
            RpcError::BadInput { causes, .. } => Some(causes),
            _ => None,
        }
    }
}

// Static constructor methods
impl RpcError {
    pub fn bad_input(causes: Vec<FieldError>) -> Self {
        let message = match causes.len() {
            1 => "Input validation failed for 1 field".to_string(),
            n => format!("Input validation failed for {} fields", n),
        };
        RpcError::BadInput { message, causes }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        RpcError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        RpcError::NotFound(message.into())
    }

    pub fn method_mismatch(message: impl Into<String>) -> Self {
        RpcError::MethodMismatch(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RpcError::Internal(message.into())
    }
}

impl From<DomainError> for RpcError {
    fn from(err: DomainError) -> Self {
        match err.code {
            DomainCode::BadRequest => RpcError::BadRequest(err.message),
            DomainCode::Forbidden => RpcError::Forbidden(err.message),
            DomainCode::Conflict => RpcError::Conflict(err.message),
            DomainCode::PreconditionFailed => RpcError::PreconditionFailed(err.message),
            DomainCode::TooManyRequests => RpcError::TooManyRequests(err.message),
        }
    }
}

// Handler failures: a DomainError anywhere in the chain is surfaced, everything else is internal
impl From<anyhow::Error> for RpcError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(domain) = err.chain().find_map(|e| e.downcast_ref::<DomainError>()) {
            return domain.clone().into();
        }
        tracing::error!("Procedure handler failed: {:#}", err);
        RpcError::internal("An error occurred while processing your request")
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for RpcError {}
