use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub rpc_prefix: String,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Substitute a placeholder principal for every request (no identity store available)
    pub mock_mode: bool,
    pub session_cookie_name: String,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub secure_cookies: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mock mode disables authentication and cannot be enabled in production")]
    MockModeInProduction,

    #[error("JWT_SECRET must be set when mock mode is disabled")]
    MissingJwtSecret,

    #[error("SECURITY_CORS_ORIGINS cannot contain '*' because credentialed requests are allowed")]
    WildcardCorsOrigin,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Ok(v) = env::var("API_RPC_PREFIX") {
            self.api.rpc_prefix = v;
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Auth overrides
        if self.environment == Environment::Development && env::var("IDENTITY_STORE_URL").is_err() {
            self.auth.mock_mode = true;
        }
        if let Ok(v) = env::var("MOCK_MODE") {
            self.auth.mock_mode = v.parse().unwrap_or(self.auth.mock_mode);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_NAME") {
            self.auth.session_cookie_name = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.auth.jwt_expiry_hours = v.parse().unwrap_or(self.auth.jwt_expiry_hours);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("SECURITY_SECURE_COOKIES") {
            self.security.secure_cookies = v.parse().unwrap_or(self.security.secure_cookies);
        }

        self
    }

    /// Reject configurations that would weaken authorization
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.mock_mode && self.environment == Environment::Production {
            return Err(ConfigError::MockModeInProduction);
        }
        if !self.auth.mock_mode && self.auth.jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }
        if self.security.enable_cors && self.security.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(ConfigError::WildcardCorsOrigin);
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                rpc_prefix: "/api/trpc".to_string(),
                enable_request_logging: true,
                max_request_size_bytes: 50 * 1024 * 1024, // 50MB
            },
            auth: AuthConfig {
                mock_mode: false,
                session_cookie_name: "app_session_id".to_string(),
                jwt_secret: "development-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                secure_cookies: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                rpc_prefix: "/api/trpc".to_string(),
                enable_request_logging: true,
                max_request_size_bytes: 50 * 1024 * 1024,
            },
            auth: AuthConfig {
                mock_mode: false,
                session_cookie_name: "app_session_id".to_string(),
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                secure_cookies: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                rpc_prefix: "/api/trpc".to_string(),
                enable_request_logging: false,
                max_request_size_bytes: 50 * 1024 * 1024,
            },
            auth: AuthConfig {
                mock_mode: false,
                session_cookie_name: "app_session_id".to_string(),
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                secure_cookies: true,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

// Helper macros for common checks
#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
