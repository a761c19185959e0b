use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::context::Context;
use super::schema::Contract;
use crate::error::RpcError;
use crate::types::{AuthRequirement, OperationKind};

pub type HandlerFuture = BoxFuture<'static, Result<Value, RpcError>>;

/// Type-erased procedure body working on validated JSON
pub trait ErasedHandler: Send + Sync + 'static {
    fn call(&self, ctx: Arc<Context>, input: Value) -> HandlerFuture;
}

/// Adapts a typed async function `(ctx, input) -> anyhow::Result<output>`
struct FnHandler<F, I, O, Fut> {
    func: F,
    _phantom: PhantomData<fn(I) -> (O, Fut)>,
}

impl<F, I, O, Fut> ErasedHandler for FnHandler<F, I, O, Fut>
where
    F: Fn(Arc<Context>, I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
{
    fn call(&self, ctx: Arc<Context>, input: Value) -> HandlerFuture {
        let input: I = match serde_json::from_value(input) {
            Ok(input) => input,
            Err(e) => {
                // The contract and the handler's input type disagree
                tracing::error!("Validated input does not fit handler input type: {}", e);
                return future::ready(Err(RpcError::internal("Procedure input mapping failed"))).boxed();
            }
        };

        let fut = (self.func)(ctx, input);
        async move {
            let output = fut.await?;
            serde_json::to_value(output).map_err(|e| {
                tracing::error!("Failed to serialize procedure output: {}", e);
                RpcError::internal("Failed to format response")
            })
        }
        .boxed()
    }
}

/// A registered procedure: contract, kind, authorization and handler.
/// Immutable once built; cheap to clone.
#[derive(Clone)]
pub struct Procedure {
    input: Option<Contract>,
    kind: OperationKind,
    auth: AuthRequirement,
    handler: Arc<dyn ErasedHandler>,
}

impl Procedure {
    pub fn define<F, I, O, Fut>(
        input: Option<Contract>,
        kind: OperationKind,
        auth: AuthRequirement,
        handler: F,
    ) -> Self
    where
        F: Fn(Arc<Context>, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
        I: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
    {
        Self {
            input,
            kind,
            auth,
            handler: Arc::new(FnHandler {
                func: handler,
                _phantom: PhantomData,
            }),
        }
    }

    /// Start a procedure callable without a principal
    pub fn public() -> ProcedureBuilder {
        ProcedureBuilder {
            auth: AuthRequirement::Public,
            input: None,
        }
    }

    /// Start a procedure that requires a principal
    pub fn protected() -> ProcedureBuilder {
        ProcedureBuilder {
            auth: AuthRequirement::Protected,
            input: None,
        }
    }

    pub fn input_contract(&self) -> Option<&Contract> {
        self.input.as_ref()
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn auth(&self) -> AuthRequirement {
        self.auth
    }

    pub(crate) fn invoke(&self, ctx: Arc<Context>, input: Value) -> HandlerFuture {
        self.handler.call(ctx, input)
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("kind", &self.kind)
            .field("auth", &self.auth)
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

pub struct ProcedureBuilder {
    auth: AuthRequirement,
    input: Option<Contract>,
}

impl ProcedureBuilder {
    pub fn input(mut self, contract: Contract) -> Self {
        self.input = Some(contract);
        self
    }

    pub fn query<F, I, O, Fut>(self, handler: F) -> Procedure
    where
        F: Fn(Arc<Context>, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
        I: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
    {
        Procedure::define(self.input, OperationKind::Query, self.auth, handler)
    }

    pub fn mutation<F, I, O, Fut>(self, handler: F) -> Procedure
    where
        F: Fn(Arc<Context>, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<O>> + Send + 'static,
        I: DeserializeOwned + Send + 'static,
        O: Serialize + Send + 'static,
    {
        Procedure::define(self.input, OperationKind::Mutation, self.auth, handler)
    }
}
