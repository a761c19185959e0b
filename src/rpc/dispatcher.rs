use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;
use tracing::Instrument;

use super::context::Context;
use super::envelope::CallEnvelope;
use super::router::{Router, RouterNode};
use super::schema::validate;
use crate::error::{FieldError, RpcError};
use crate::types::{AuthRequirement, OperationKind};

/// Raw call input as handed over by the transport. Malformed input is kept
/// as-is so it is only reported after the authorization gate.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Absent,
    Json(Value),
    Malformed(String),
}

impl RawInput {
    /// Input of a query: the JSON-encoded `input` query parameter
    pub fn from_query_param(param: Option<&str>) -> Self {
        match param {
            None => RawInput::Absent,
            Some(s) if s.trim().is_empty() => RawInput::Absent,
            Some(s) => Self::parse(s.as_bytes()),
        }
    }

    /// Input of a mutation: the JSON request body
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return RawInput::Absent;
        }
        Self::parse(body)
    }

    fn parse(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => RawInput::Json(value),
            Err(e) => RawInput::Malformed(e.to_string()),
        }
    }

    fn into_value(self) -> Result<Value, FieldError> {
        match self {
            RawInput::Absent => Ok(Value::Null),
            RawInput::Json(value) => Ok(value),
            RawInput::Malformed(reason) => Err(FieldError::new("", format!("Malformed JSON input: {}", reason))),
        }
    }
}

impl From<Value> for RawInput {
    fn from(value: Value) -> Self {
        RawInput::Json(value)
    }
}

/// Routes calls through the procedure tree, gating and validating them
#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
}

impl Dispatcher {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Dispatch one call. Always yields exactly one envelope.
    pub async fn dispatch(
        &self,
        ctx: Context,
        path: &str,
        kind: OperationKind,
        raw_input: RawInput,
    ) -> CallEnvelope {
        let span = tracing::info_span!("dispatch", request_id = %ctx.request_id(), path, kind = %kind);

        async move {
            let result = self.call(ctx, path, kind, raw_input).await;
            match &result {
                Ok(_) => tracing::debug!("Procedure call succeeded"),
                Err(RpcError::Internal(msg)) => tracing::error!("Procedure call failed: {}", msg),
                Err(err) => tracing::warn!("Procedure call rejected: {}", err),
            }
            CallEnvelope::from(result)
        }
        .instrument(span)
        .await
    }

    async fn call(
        &self,
        ctx: Context,
        path: &str,
        kind: OperationKind,
        raw_input: RawInput,
    ) -> Result<Value, RpcError> {
        // 1 + 2: locate a procedure, namespaces are not callable
        let procedure = match self.router.resolve(path) {
            Some(RouterNode::Procedure(procedure)) => procedure,
            Some(RouterNode::Router(_)) | None => {
                return Err(RpcError::not_found(format!("No procedure found on path '{}'", path)))
            }
        };

        // 3: declared kind must match
        if procedure.kind() != kind {
            return Err(RpcError::method_mismatch(format!(
                "'{}' is a {} and cannot be called as a {}",
                path,
                procedure.kind(),
                kind
            )));
        }

        // 4: authorization gate, before any look at the input
        if procedure.auth() == AuthRequirement::Protected && ctx.principal().is_none() {
            return Err(RpcError::unauthorized("Please login (10001)"));
        }

        // 5: input contract
        let input = match procedure.input_contract() {
            Some(contract) => {
                let raw = raw_input.into_value().map_err(|cause| RpcError::bad_input(vec![cause]))?;
                validate(contract, &raw).map_err(|e| RpcError::bad_input(e.causes))?
            }
            None => Value::Null,
        };

        // 6 + 7: run the handler; failures and panics end as error envelopes
        let ctx = Arc::new(ctx.with_router(Arc::clone(&self.router)));
        match AssertUnwindSafe(procedure.invoke(ctx, input))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Procedure handler panicked on path '{}'", path);
                Err(RpcError::internal("An error occurred while processing your request"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use crate::config::AppConfig;
    use crate::error::DomainError;
    use crate::rpc::context::{RequestHandle, ResponseHandle};
    use crate::rpc::procedure::Procedure;
    use crate::rpc::schema::{Contract, FieldKind};
    use crate::state::AppState;
    use axum::http::{HeaderMap, Method, Uri};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTED_CALLS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Deserialize)]
    struct EchoInput {
        topic: String,
    }

    async fn echo(_ctx: Arc<Context>, input: EchoInput) -> anyhow::Result<Value> {
        Ok(json!({ "topic": input.topic }))
    }

    async fn counted(_ctx: Arc<Context>, _input: EchoInput) -> anyhow::Result<()> {
        COUNTED_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn whoami(ctx: Arc<Context>, _: ()) -> anyhow::Result<Option<Principal>> {
        Ok(ctx.principal().cloned())
    }

    async fn explode(_ctx: Arc<Context>, _: ()) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("store offline"))
    }

    async fn refuse(_ctx: Arc<Context>, _: ()) -> anyhow::Result<()> {
        Err(DomainError::conflict("already taken").into())
    }

    async fn panics(_ctx: Arc<Context>, _: ()) -> anyhow::Result<()> {
        panic!("handler bug")
    }

    fn topic_contract() -> Contract {
        Contract::object()
            .required("topic", FieldKind::String)
            .required("question", FieldKind::String)
    }

    fn dispatcher() -> Dispatcher {
        let ns = Router::builder()
            .procedure("echo", Procedure::protected().input(topic_contract()).mutation(echo))
            .procedure("peek", Procedure::protected().input(topic_contract()).query(echo))
            .procedure("countedMutation", Procedure::protected().input(topic_contract()).mutation(counted))
            .procedure("countedQuery", Procedure::protected().input(topic_contract()).query(counted))
            .build()
            .unwrap();
        let router = Router::builder()
            .nest("ns", ns)
            .procedure("whoami", Procedure::public().query(whoami))
            .procedure("explode", Procedure::public().mutation(explode))
            .procedure("refuse", Procedure::public().mutation(refuse))
            .procedure("panics", Procedure::public().query(panics))
            .build()
            .unwrap();
        Dispatcher::new(Arc::new(router))
    }

    fn ctx(principal: Option<Principal>) -> Context {
        Context::new(
            RequestHandle::new(Method::POST, Uri::from_static("/"), HeaderMap::new()),
            ResponseHandle::new(),
            principal,
            AppState::init(AppConfig::development()),
        )
    }

    fn error_kind(env: &CallEnvelope) -> &'static str {
        env.error_kind().unwrap_or("none")
    }

    #[tokio::test]
    async fn unknown_path_and_namespace_are_not_found() {
        let d = dispatcher();
        let env = d.dispatch(ctx(None), "ns.missing", OperationKind::Query, RawInput::Absent).await;
        assert_eq!(error_kind(&env), "NOT_FOUND");
        let env = d.dispatch(ctx(None), "ns", OperationKind::Query, RawInput::Absent).await;
        assert_eq!(error_kind(&env), "NOT_FOUND");
    }

    #[tokio::test]
    async fn kind_mismatch_never_reaches_the_handler() {
        let d = dispatcher();
        let input = RawInput::from(json!({"topic": "a", "question": "b"}));
        let env = d
            .dispatch(ctx(Some(Principal::placeholder())), "ns.countedMutation", OperationKind::Query, input.clone())
            .await;
        assert_eq!(error_kind(&env), "METHOD_MISMATCH");
        let env = d
            .dispatch(ctx(Some(Principal::placeholder())), "ns.countedQuery", OperationKind::Mutation, input)
            .await;
        assert_eq!(error_kind(&env), "METHOD_MISMATCH");
        assert_eq!(COUNTED_CALLS.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unauthorized_precedes_validation() {
        let d = dispatcher();
        for input in [
            RawInput::Absent,
            RawInput::Malformed("eof".into()),
            RawInput::from(json!({"topic": 1})),
        ] {
            let env = d.dispatch(ctx(None), "ns.echo", OperationKind::Mutation, input).await;
            assert_eq!(error_kind(&env), "UNAUTHORIZED");
            let wire = serde_json::to_value(&env).unwrap();
            assert!(wire.get("causes").is_none());
        }
    }

    #[tokio::test]
    async fn queries_are_gated_like_mutations() {
        let env = dispatcher()
            .dispatch(ctx(None), "ns.peek", OperationKind::Query, RawInput::Absent)
            .await;
        assert_eq!(error_kind(&env), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn public_procedures_run_without_principal() {
        let env = dispatcher()
            .dispatch(ctx(None), "whoami", OperationKind::Query, RawInput::Absent)
            .await;
        assert_eq!(env, CallEnvelope::success(Value::Null));
    }

    #[tokio::test]
    async fn missing_fields_are_all_reported() {
        let env = dispatcher()
            .dispatch(
                ctx(Some(Principal::placeholder())),
                "ns.echo",
                OperationKind::Mutation,
                RawInput::from(json!({})),
            )
            .await;
        match env {
            CallEnvelope::Error(RpcError::BadInput { causes, .. }) => assert_eq!(causes.len(), 2),
            other => panic!("expected BadInput, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_bad_input_once_authorized() {
        let env = dispatcher()
            .dispatch(
                ctx(Some(Principal::placeholder())),
                "ns.echo",
                OperationKind::Mutation,
                RawInput::from_body(b"{not json"),
            )
            .await;
        assert_eq!(error_kind(&env), "BAD_INPUT");
    }

    #[tokio::test]
    async fn valid_call_returns_handler_output() {
        let env = dispatcher()
            .dispatch(
                ctx(Some(Principal::placeholder())),
                "ns.echo",
                OperationKind::Mutation,
                RawInput::from(json!({"topic": "Arrays", "question": "q", "ignored": true})),
            )
            .await;
        assert_eq!(env, CallEnvelope::success(json!({"topic": "Arrays"})));
    }

    #[tokio::test]
    async fn handler_failures_map_to_internal_or_domain_errors() {
        let d = dispatcher();
        let env = d.dispatch(ctx(None), "explode", OperationKind::Mutation, RawInput::Absent).await;
        assert_eq!(error_kind(&env), "INTERNAL");
        let env = d.dispatch(ctx(None), "refuse", OperationKind::Mutation, RawInput::Absent).await;
        assert_eq!(error_kind(&env), "CONFLICT");
        let env = d.dispatch(ctx(None), "panics", OperationKind::Query, RawInput::Absent).await;
        assert_eq!(error_kind(&env), "INTERNAL");
    }

    #[test]
    fn raw_input_parsing() {
        assert_eq!(RawInput::from_query_param(None), RawInput::Absent);
        assert_eq!(RawInput::from_query_param(Some("{\"id\":999}")), RawInput::Json(json!({"id": 999})));
        assert!(matches!(RawInput::from_query_param(Some("{id")), RawInput::Malformed(_)));
        assert_eq!(RawInput::from_body(b"  \n"), RawInput::Absent);
    }
}
