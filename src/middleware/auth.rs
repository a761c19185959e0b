use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::auth::{AuthError, Claims, Principal, PrincipalResolver};
use crate::config::AuthConfig;
use crate::rpc::RequestHandle;

/// Resolves the caller from a signed session token.
///
/// The session cookie is tried first. When it is absent or fails validation
/// the `Authorization: Bearer` header is tried instead.
#[derive(Clone)]
pub struct JwtPrincipalResolver {
    cookie_name: String,
    secret: String,
}

impl JwtPrincipalResolver {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            cookie_name: auth.session_cookie_name.clone(),
            secret: auth.jwt_secret.clone(),
        }
    }

    fn cookie_token<'a>(&self, request: &'a RequestHandle) -> Option<&'a str> {
        request
            .cookie(&self.cookie_name)
            .filter(|token| !token.trim().is_empty())
    }
}

#[async_trait]
impl PrincipalResolver for JwtPrincipalResolver {
    async fn resolve(&self, request: &RequestHandle) -> Result<Principal, AuthError> {
        let cookie_error = match self.cookie_token(request) {
            Some(token) => match validate_jwt(token, &self.secret) {
                Ok(claims) => return Ok(claims.into_principal()),
                Err(e) => Some(e),
            },
            None => None,
        };

        match extract_jwt_from_headers(request) {
            Ok(token) => Ok(validate_jwt(&token, &self.secret)?.into_principal()),
            // A rejected cookie explains the failure better than a missing header
            Err(AuthError::MissingCredentials) => Err(cookie_error.unwrap_or(AuthError::MissingCredentials)),
            Err(e) => Err(e),
        }
    }
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(request: &RequestHandle) -> Result<String, AuthError> {
    let auth_str = request
        .header(AUTHORIZATION.as_str())
        .ok_or(AuthError::MissingCredentials)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if token.trim().is_empty() => Err(AuthError::Malformed("empty bearer token".into())),
        Some(token) => Ok(token.trim().to_string()),
        None => Err(AuthError::Malformed(
            "Authorization header must use Bearer token format".into(),
        )),
    }
}

/// Validate JWT token and extract claims
fn validate_jwt(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
