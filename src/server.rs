// server.rs - HTTP transport for the procedure router
//
// GET  {prefix}/:path?input=<json>  -> query
// POST {prefix}/:path  (JSON body)   -> mutation

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, Method, Uri},
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::{JwtPrincipalResolver, RpcResponse};
use crate::rpc::{ContextFactory, Dispatcher, RawInput, RequestHandle, ResponseHandle};
use crate::state::AppState;
use crate::types::OperationKind;

/// Everything a transport handler needs to run one call
pub struct ServerState {
    factory: ContextFactory,
    dispatcher: Dispatcher,
}

impl ServerState {
    async fn call(&self, request: RequestHandle, path: &str, kind: OperationKind, raw: RawInput) -> RpcResponse {
        let response = ResponseHandle::new();
        let ctx = self.factory.create_context(request, response.clone()).await;
        let envelope = self.dispatcher.dispatch(ctx, path, kind, raw).await;
        RpcResponse::new(envelope, response.set_cookie_headers())
    }
}

/// Build the axum application for the given configuration
pub fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let procedures = handlers::app_router().context("failed to compose procedure router")?;
    tracing::info!("Registered {} procedures", procedures.procedures().len());

    let resolver = Arc::new(JwtPrincipalResolver::new(&config.auth));
    let state = AppState::init(config.clone());
    let server = Arc::new(ServerState {
        factory: ContextFactory::new(resolver, state),
        dispatcher: Dispatcher::new(Arc::new(procedures)),
    });

    let rpc_route = format!("{}/:path", config.api.rpc_prefix.trim_end_matches('/'));

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(&rpc_route, get(rpc_query).post(rpc_mutation))
        .with_state(server)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        app = app.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    Ok(app)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter(|origin| {
            // Wildcards cannot be combined with credentials
            let wildcard = origin.trim() == "*";
            if wildcard {
                tracing::warn!("Ignoring wildcard CORS origin");
            }
            !wildcard
        })
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: AppConfig, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting JobPrep API in {:?} mode", config.environment);
    let app = build_app(config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("JobPrep API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn root(State(server): State<Arc<ServerState>>) -> Json<Value> {
    let procedures = server.dispatcher.router().procedures().len();

    Json(json!({
        "success": true,
        "data": {
            "name": "JobPrep API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Typed procedure API for job search and interview preparation",
            "procedures": procedures,
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn rpc_query(
    State(server): State<Arc<ServerState>>,
    Path(path): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> RpcResponse {
    let raw = RawInput::from_query_param(params.get("input").map(String::as_str));
    server
        .call(RequestHandle::new(method, uri, headers), &path, OperationKind::Query, raw)
        .await
}

async fn rpc_mutation(
    State(server): State<Arc<ServerState>>,
    Path(path): Path<String>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> RpcResponse {
    let raw = RawInput::from_body(&body);
    server
        .call(RequestHandle::new(method, uri, headers), &path, OperationKind::Mutation, raw)
        .await
}
