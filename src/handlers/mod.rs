// handlers/mod.rs - procedure tree of the JobPrep API
//
// Two tiers, mirrored by the directory layout:
// Public (no principal needed): system.*, auth.*
// Protected (principal required): every domain namespace

pub mod protected;
pub mod public;

use serde::Deserialize;

use crate::rpc::{Contract, FieldKind, RegistrationError, Router};

/// Compose the full application router. Fails only on duplicate segments.
pub fn app_router() -> Result<Router, RegistrationError> {
    Router::builder()
        .nest("system", public::system::router()?)
        .nest("auth", public::auth::router()?)
        .nest("bookmarks", protected::bookmarks::router()?)
        .nest("preferences", protected::preferences::router()?)
        .nest("jobs", protected::jobs::router()?)
        .nest("interviews", protected::interviews::router()?)
        .nest("mockInterview", protected::mock_interview::router()?)
        .nest("onboarding", protected::onboarding::router()?)
        .nest("knowledgeBase", protected::knowledge_base::router()?)
        .nest("topicPractice", protected::topic_practice::router()?)
        .nest("resume", protected::resume::router()?)
        .nest("jobTracker", protected::job_tracker::router()?)
        .nest("linkedin", protected::linkedin::router()?)
        .nest("jobhProfile", protected::jobh_profile::router()?)
        .nest("aiToolbox", protected::ai_toolbox::router()?)
        .nest("skillAnalysis", protected::skill_analysis::router()?)
        .build()
}

/// `{ id }` input shared by lookups and deletes
#[derive(Debug, Deserialize)]
pub struct ById {
    pub id: i64,
}

pub fn by_id() -> Contract {
    Contract::object().required("id", FieldKind::Integer)
}

#[derive(Debug, serde::Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::http::{HeaderMap, Method, Uri};
    use serde_json::Value;

    use crate::auth::Principal;
    use crate::config::AppConfig;
    use crate::rpc::{CallEnvelope, Context, Dispatcher, RawInput, RequestHandle, ResponseHandle, Router};
    use crate::state::AppState;
    use crate::types::OperationKind;

    /// Dispatcher over one namespace plus fresh state, signed in as the placeholder principal
    pub struct Harness {
        dispatcher: Dispatcher,
        pub state: Arc<AppState>,
    }

    impl Harness {
        pub fn new(router: Router) -> Self {
            Self {
                dispatcher: Dispatcher::new(Arc::new(router)),
                state: AppState::init(AppConfig::development()),
            }
        }

        fn context(&self) -> Context {
            Context::new(
                RequestHandle::new(Method::POST, Uri::from_static("/api/trpc"), HeaderMap::new()),
                ResponseHandle::new(),
                Some(Principal::placeholder()),
                Arc::clone(&self.state),
            )
        }

        async fn call(&self, path: &str, kind: OperationKind, input: Value) -> Value {
            let raw = if input.is_null() { RawInput::Absent } else { RawInput::Json(input) };
            match self.dispatcher.dispatch(self.context(), path, kind, raw).await {
                CallEnvelope::Success(data) => data,
                CallEnvelope::Error(err) => panic!("{} failed: {:?}", path, err),
            }
        }

        pub async fn query(&self, path: &str, input: Value) -> Value {
            self.call(path, OperationKind::Query, input).await
        }

        pub async fn mutate(&self, path: &str, input: Value) -> Value {
            self.call(path, OperationKind::Mutation, input).await
        }

        pub async fn error_kind(&self, path: &str, kind: OperationKind, input: Value) -> Option<&'static str> {
            let env = self.dispatcher.dispatch(self.context(), path, kind, RawInput::Json(input)).await;
            env.error_kind()
        }
    }
}
