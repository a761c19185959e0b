#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use jobprep_api::auth::{issue_session_token, Principal, Role};
use jobprep_api::config::AppConfig;
use reqwest::{header, StatusCode};
use serde_json::Value;
use tokio::task::JoinHandle;

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-process server bound to a free port, stopped when dropped.
/// Each test gets its own server and therefore its own seeded stores.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub config: AppConfig,
    client: reqwest::Client,
    task: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Every request runs as the placeholder principal
pub fn mock_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.mock_mode = true;
    config.api.enable_request_logging = false;
    config
}

/// Principals come from signed session tokens only
pub fn jwt_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.mock_mode = false;
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.api.enable_request_logging = false;
    config
}

impl TestServer {
    pub async fn start(config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let server_config = config.clone();
        let task = tokio::spawn(async move {
            if let Err(e) = jobprep_api::server::serve(server_config, port).await {
                eprintln!("test server on port {} stopped: {:#}", port, e);
            }
        });

        let server = Self {
            port,
            base_url,
            config,
            client: reqwest::Client::new(),
            task,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn procedure_url(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, self.config.api.rpc_prefix, path)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Sign a session token for `principal` with this server's secret
    pub fn token_for(&self, principal: &Principal) -> Result<String> {
        Ok(issue_session_token(principal, &self.config.auth)?)
    }

    /// Query with optional JSON input and optional bearer token
    pub async fn query(&self, path: &str, input: Option<Value>, token: Option<&str>) -> Result<Call> {
        let mut req = self.client.get(self.procedure_url(path));
        if let Some(input) = input {
            req = req.query(&[("input", input.to_string())]);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Call::from_response(req.send().await?).await
    }

    /// Mutation with a JSON body and optional bearer token
    pub async fn mutate(&self, path: &str, input: Option<Value>, token: Option<&str>) -> Result<Call> {
        let body = input.map(|v| v.to_string()).unwrap_or_default();
        self.mutate_raw(path, body, token).await
    }

    pub async fn mutate_raw(&self, path: &str, body: String, token: Option<&str>) -> Result<Call> {
        let mut req = self
            .client
            .post(self.procedure_url(path))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Call::from_response(req.send().await?).await
    }
}

/// Status, Set-Cookie headers and decoded envelope of one HTTP call
#[derive(Debug)]
pub struct Call {
    pub status: StatusCode,
    pub cookies: Vec<String>,
    pub body: Value,
}

impl Call {
    async fn from_response(resp: reqwest::Response) -> Result<Self> {
        let status = resp.status();
        let cookies = resp
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(str::to_string))
            .collect();
        let body = resp.json::<Value>().await.context("response body is not JSON")?;
        Ok(Self { status, cookies, body })
    }

    pub fn is_success(&self) -> bool {
        self.body["outcome"] == "success"
    }

    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn error_kind(&self) -> Option<&str> {
        self.body["errorKind"].as_str()
    }
}

/// A signed-in user distinct from the placeholder principal
pub fn real_user(id: i64) -> Principal {
    let mut principal = Principal::placeholder();
    principal.id = id;
    principal.open_id = format!("oauth|{}", id);
    principal.name = Some(format!("User {}", id));
    principal.email = Some(format!("user{}@example.com", id));
    principal.login_method = Some("oauth".to_string());
    principal.role = Role::User;
    principal
}
