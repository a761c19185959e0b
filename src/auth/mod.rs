use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::rpc::RequestHandle;

pub const PLACEHOLDER_OPEN_ID: &str = "mock-user-001";
pub const PLACEHOLDER_LOGIN_METHOD: &str = "mock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Authenticated caller identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_signed_in: DateTime<Utc>,
}

impl Principal {
    /// Fixed identity used when no identity store is available
    pub fn placeholder() -> Self {
        let epoch = Utc.timestamp_opt(0, 0).single().unwrap_or_default();
        Self {
            id: 1,
            open_id: PLACEHOLDER_OPEN_ID.to_string(),
            name: Some("Mock User".to_string()),
            email: Some("mock@example.com".to_string()),
            login_method: Some(PLACEHOLDER_LOGIN_METHOD.to_string()),
            role: Role::User,
            created_at: epoch,
            updated_at: epoch,
            last_signed_in: epoch,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.open_id == PLACEHOLDER_OPEN_ID
            && self.login_method.as_deref() == Some(PLACEHOLDER_LOGIN_METHOD)
    }
}

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(principal: &Principal, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: principal.id,
            open_id: principal.open_id.clone(),
            name: principal.name.clone(),
            email: principal.email.clone(),
            login_method: principal.login_method.clone(),
            role: principal.role,
            exp,
            iat: now.timestamp(),
        }
    }

    pub fn into_principal(self) -> Principal {
        let signed_in = Utc.timestamp_opt(self.iat, 0).single().unwrap_or_else(Utc::now);
        Principal {
            id: self.sub,
            open_id: self.open_id,
            name: self.name,
            email: self.email,
            login_method: self.login_method,
            role: self.role,
            created_at: signed_in,
            updated_at: signed_in,
            last_signed_in: signed_in,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing session credentials")]
    MissingCredentials,

    #[error("Malformed credentials: {0}")]
    Malformed(String),

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Session signing secret not configured")]
    InvalidSecret,

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),
}

/// Resolves the authenticated caller of a raw request.
/// Implementations may suspend on I/O; failures are never fatal to the request.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    async fn resolve(&self, request: &RequestHandle) -> Result<Principal, AuthError>;
}

/// Sign a session token for the given principal
pub fn issue_session_token(principal: &Principal, auth: &AuthConfig) -> Result<String, AuthError> {
    if auth.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let claims = Claims::new(principal, auth.jwt_expiry_hours);
    let encoding_key = EncodingKey::from_secret(auth.jwt_secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}
