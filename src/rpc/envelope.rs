use axum::http::StatusCode;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{FieldError, RpcError};

/// Outcome of one dispatched call: exactly one of success or error
#[derive(Debug, Clone, PartialEq)]
pub enum CallEnvelope {
    Success(Value),
    Error(RpcError),
}

impl CallEnvelope {
    pub fn success(data: Value) -> Self {
        CallEnvelope::Success(data)
    }

    pub fn error(err: RpcError) -> Self {
        CallEnvelope::Error(err)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallEnvelope::Success(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            CallEnvelope::Success(data) => Some(data),
            CallEnvelope::Error(_) => None,
        }
    }

    pub fn error_kind(&self) -> Option<&'static str> {
        match self {
            CallEnvelope::Success(_) => None,
            CallEnvelope::Error(err) => Some(err.error_code()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            CallEnvelope::Success(_) => StatusCode::OK,
            CallEnvelope::Error(err) => err.status_code(),
        }
    }
}

impl From<Result<Value, RpcError>> for CallEnvelope {
    fn from(result: Result<Value, RpcError>) -> Self {
        match result {
            Ok(data) => CallEnvelope::Success(data),
            Err(err) => CallEnvelope::Error(err),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
enum Wire<'a> {
    Success {
        data: &'a Value,
    },
    Error {
        #[serde(rename = "errorKind")]
        error_kind: &'static str,
        message: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        causes: Option<&'a [FieldError]>,
    },
}

impl Serialize for CallEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            CallEnvelope::Success(data) => Wire::Success { data },
            CallEnvelope::Error(err) => Wire::Error {
                error_kind: err.error_code(),
                message: err.message(),
                causes: err.causes(),
            },
        };
        wire.serialize(serializer)
    }
}
