use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use axum::http::{header, request::Parts, HeaderMap, HeaderValue, Method, Uri};
use futures::FutureExt;
use uuid::Uuid;

use super::router::Router;
use crate::auth::{Principal, PrincipalResolver};
use crate::state::AppState;

/// Read-only view of the inbound request
#[derive(Debug, Clone)]
pub struct RequestHandle {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    cookies: HashMap<String, String>,
}

impl RequestHandle {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        let cookies = parse_cookies(&headers);
        Self {
            method,
            uri,
            headers,
            cookies,
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(parts.method.clone(), parts.uri.clone(), parts.headers.clone())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

/// Parse every `Cookie` header into a name -> value map (first occurrence wins)
pub fn parse_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for value in headers.get_all(header::COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, val)) = pair.trim().split_once('=') {
                let name = name.trim();
                if !name.is_empty() {
                    cookies
                        .entry(name.to_string())
                        .or_insert_with(|| val.trim().to_string());
                }
            }
        }
    }
    cookies
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

#[derive(Debug, Clone)]
pub struct CookieOptions {
    pub path: String,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age: Option<i64>,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            http_only: true,
            secure: false,
            same_site: SameSite::Lax,
            max_age: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CookieChange {
    Set(String),
    Clear,
}

#[derive(Debug, Default)]
struct ResponseState {
    // One pending change per cookie name, in first-touched order
    cookies: Vec<(String, CookieChange, CookieOptions)>,
}

/// Outbound response capabilities shared between a procedure and the transport.
/// Cloning yields another handle to the same response.
#[derive(Debug, Clone, Default)]
pub struct ResponseHandle {
    inner: Arc<Mutex<ResponseState>>,
}

impl ResponseHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cookie(&self, name: &str, value: impl Into<String>, options: &CookieOptions) {
        self.record(name, CookieChange::Set(value.into()), options);
    }

    /// Expire a cookie on the client. Clearing an already cleared cookie is a no-op.
    pub fn clear_cookie(&self, name: &str, options: &CookieOptions) {
        self.record(name, CookieChange::Clear, options);
    }

    fn record(&self, name: &str, change: CookieChange, options: &CookieOptions) {
        let mut state = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match state.cookies.iter_mut().find(|(n, _, _)| n == name) {
            Some(entry) if entry.1 == change => {}
            Some(entry) => {
                entry.1 = change;
                entry.2 = options.clone();
            }
            None => state.cookies.push((name.to_string(), change, options.clone())),
        }
    }

    /// Render pending cookie changes as `Set-Cookie` header values
    pub fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        let state = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state
            .cookies
            .iter()
            .filter_map(|(name, change, options)| {
                HeaderValue::from_str(&render_set_cookie(name, change, options)).ok()
            })
            .collect()
    }
}

fn render_set_cookie(name: &str, change: &CookieChange, options: &CookieOptions) -> String {
    let (value, max_age) = match change {
        CookieChange::Set(value) => (value.as_str(), options.max_age),
        CookieChange::Clear => ("", Some(0)),
    };

    let mut cookie = format!("{}={}; Path={}", name, value, options.path);
    if let Some(age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", age.max(0)));
    }
    if matches!(change, CookieChange::Clear) {
        cookie.push_str("; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
    }
    if options.http_only {
        cookie.push_str("; HttpOnly");
    }
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie.push_str(match options.same_site {
        SameSite::Strict => "; SameSite=Strict",
        SameSite::Lax => "; SameSite=Lax",
        SameSite::None => "; SameSite=None",
    });
    cookie
}

/// Per-call execution context. Built once per inbound call and never mutated.
#[derive(Debug)]
pub struct Context {
    request_id: Uuid,
    request: RequestHandle,
    response: ResponseHandle,
    principal: Option<Principal>,
    state: Arc<AppState>,
    router: Option<Arc<Router>>,
}

impl Context {
    pub fn new(
        request: RequestHandle,
        response: ResponseHandle,
        principal: Option<Principal>,
        state: Arc<AppState>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            request,
            response,
            principal,
            state,
            router: None,
        }
    }

    /// Attach the procedure tree serving this call
    pub fn with_router(mut self, router: Arc<Router>) -> Self {
        self.router = Some(router);
        self
    }

    /// The procedure tree this call was dispatched through
    pub fn router(&self) -> Option<&Router> {
        self.router.as_deref()
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn request(&self) -> &RequestHandle {
        &self.request
    }

    pub fn response(&self) -> &ResponseHandle {
        &self.response
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Principal of a protected procedure; the dispatcher guarantees presence
    pub fn require_principal(&self) -> anyhow::Result<&Principal> {
        self.principal
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("protected handler invoked without a principal"))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Cookie options for the session cookie under the current configuration
    pub fn session_cookie_options(&self) -> CookieOptions {
        CookieOptions {
            secure: self.state.config.security.secure_cookies,
            ..CookieOptions::default()
        }
    }
}

/// Builds a `Context` for every inbound call
pub struct ContextFactory {
    resolver: Arc<dyn PrincipalResolver>,
    mock_mode: bool,
    state: Arc<AppState>,
}

impl ContextFactory {
    pub fn new(resolver: Arc<dyn PrincipalResolver>, state: Arc<AppState>) -> Self {
        let mock_mode = state.config.auth.mock_mode;
        if mock_mode {
            tracing::warn!("Mock mode enabled: every request runs as the placeholder principal");
        }
        Self {
            resolver,
            mock_mode,
            state,
        }
    }

    /// Never fails: any resolver failure leaves the context without a principal
    pub async fn create_context(&self, request: RequestHandle, response: ResponseHandle) -> Context {
        let principal = if self.mock_mode {
            Some(Principal::placeholder())
        } else {
            match AssertUnwindSafe(self.resolver.resolve(&request)).catch_unwind().await {
                Ok(Ok(principal)) => Some(principal),
                Ok(Err(e)) => {
                    tracing::debug!("Principal resolution failed, continuing unauthenticated: {}", e);
                    None
                }
                Err(_) => {
                    tracing::error!("Principal resolver panicked, continuing unauthenticated");
                    None
                }
            }
        };

        Context::new(request, response, principal, Arc::clone(&self.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;
    use crate::config::AppConfig;
    use async_trait::async_trait;

    struct FixedResolver(Option<Principal>);

    #[async_trait]
    impl PrincipalResolver for FixedResolver {
        async fn resolve(&self, _request: &RequestHandle) -> Result<Principal, AuthError> {
            self.0.clone().ok_or(AuthError::MissingCredentials)
        }
    }

    struct PanickingResolver;

    #[async_trait]
    impl PrincipalResolver for PanickingResolver {
        async fn resolve(&self, _request: &RequestHandle) -> Result<Principal, AuthError> {
            panic!("identity backend exploded")
        }
    }

    fn request() -> RequestHandle {
        RequestHandle::new(Method::GET, Uri::from_static("/api/trpc/auth.me"), HeaderMap::new())
    }

    fn state(mock_mode: bool) -> Arc<AppState> {
        let mut config = AppConfig::development();
        config.auth.mock_mode = mock_mode;
        AppState::init(config)
    }

    #[tokio::test]
    async fn resolver_failure_downgrades_to_absent_principal() {
        let factory = ContextFactory::new(Arc::new(FixedResolver(None)), state(false));
        let ctx = factory.create_context(request(), ResponseHandle::new()).await;
        assert!(ctx.principal().is_none());
    }

    #[tokio::test]
    async fn resolver_panic_downgrades_to_absent_principal() {
        let factory = ContextFactory::new(Arc::new(PanickingResolver), state(false));
        let ctx = factory.create_context(request(), ResponseHandle::new()).await;
        assert!(ctx.principal().is_none());
    }

    #[tokio::test]
    async fn mock_mode_substitutes_placeholder() {
        let factory = ContextFactory::new(Arc::new(FixedResolver(None)), state(true));
        let ctx = factory.create_context(request(), ResponseHandle::new()).await;
        assert!(ctx.principal().map(Principal::is_placeholder).unwrap_or(false));
    }

    #[tokio::test]
    async fn each_context_gets_its_own_request_id() {
        let factory = ContextFactory::new(Arc::new(FixedResolver(None)), state(false));
        let a = factory.create_context(request(), ResponseHandle::new()).await;
        let b = factory.create_context(request(), ResponseHandle::new()).await;
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn parses_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("a=b; app_session_id=tok; c=d"));
        let handle = RequestHandle::new(Method::GET, Uri::from_static("/"), headers);
        assert_eq!(handle.cookie("app_session_id"), Some("tok"));
        assert_eq!(handle.cookie("missing"), None);
    }

    #[test]
    fn clearing_twice_is_idempotent() {
        let response = ResponseHandle::new();
        let options = CookieOptions::default();
        response.clear_cookie("app_session_id", &options);
        response.clear_cookie("app_session_id", &options);

        let headers = response.set_cookie_headers();
        assert_eq!(headers.len(), 1);
        let rendered = headers[0].to_str().unwrap();
        assert!(rendered.starts_with("app_session_id=; Path=/; Max-Age=0"));
        assert!(rendered.contains("HttpOnly"));
    }

    #[test]
    fn clear_replaces_pending_set() {
        let response = ResponseHandle::new();
        let options = CookieOptions::default();
        response.set_cookie("app_session_id", "token", &options);
        response.clear_cookie("app_session_id", &options);

        let headers = response.set_cookie_headers();
        assert_eq!(headers.len(), 1);
        assert!(headers[0].to_str().unwrap().contains("Max-Age=0"));
    }
}
