use chrono::Utc;
use serde_json::json;

use crate::auth::{issue_session_token, Principal, Role};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub struct TokenRequest {
    pub user_id: i64,
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub admin: bool,
}

impl TokenRequest {
    fn into_principal(self) -> Principal {
        let now = Utc::now();
        Principal {
            id: self.user_id,
            open_id: self.open_id,
            name: self.name,
            email: self.email,
            login_method: Some("cli".to_string()),
            role: if self.admin { Role::Admin } else { Role::User },
            created_at: now,
            updated_at: now,
            last_signed_in: now,
        }
    }
}

pub fn handle(config: &AppConfig, request: TokenRequest, output_format: OutputFormat) -> anyhow::Result<()> {
    let principal = request.into_principal();
    let token = issue_session_token(&principal, &config.auth)?;

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Session token issued",
            Some(json!({
                "token": token,
                "cookie": config.auth.session_cookie_name,
                "expires_in_hours": config.auth.jwt_expiry_hours,
            })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
