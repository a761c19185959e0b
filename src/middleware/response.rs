use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::rpc::CallEnvelope;

/// HTTP rendering of one call: status from the envelope, JSON body,
/// plus any `Set-Cookie` headers the procedure recorded
#[derive(Debug)]
pub struct RpcResponse {
    pub envelope: CallEnvelope,
    pub cookies: Vec<HeaderValue>,
}

impl RpcResponse {
    pub fn new(envelope: CallEnvelope, cookies: Vec<HeaderValue>) -> Self {
        Self { envelope, cookies }
    }
}

impl IntoResponse for RpcResponse {
    fn into_response(self) -> Response {
        let status = self.envelope.status_code();

        let body = match serde_json::to_value(&self.envelope) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize call envelope: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "outcome": "error",
                        "errorKind": "INTERNAL",
                        "message": "Failed to format response"
                    })),
                )
                    .into_response();
            }
        };

        let mut response = (status, Json(body)).into_response();
        let headers = response.headers_mut();
        for cookie in self.cookies {
            headers.append(SET_COOKIE, cookie);
        }
        response
    }
}
