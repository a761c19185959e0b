// handlers/protected/jobs.rs - job recommendations

use std::sync::Arc;

use serde::Serialize;

use crate::handlers::{by_id, ById};
use crate::models::Job;
use crate::rpc::{Context, Procedure, RegistrationError, Router};
use crate::store::Store;

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("list", Procedure::protected().query(list))
        .procedure(
            "generateRecommendations",
            Procedure::protected().mutation(generate_recommendations),
        )
        .procedure("generateMock", Procedure::protected().mutation(generate_mock))
        .procedure("getById", Procedure::protected().input(by_id()).query(get_by_id))
        .build()
}

async fn list(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<Job>> {
    Ok(ctx.state().jobs.list().await)
}

#[derive(Debug, Serialize)]
struct Generated {
    success: bool,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'static str>,
}

/// Recommendations come from the seeded catalogue; nothing new is generated
async fn generate_recommendations(ctx: Arc<Context>, _: ()) -> anyhow::Result<Generated> {
    Ok(Generated {
        success: true,
        count: ctx.state().jobs.len().await,
        source: Some("mock"),
    })
}

async fn generate_mock(ctx: Arc<Context>, _: ()) -> anyhow::Result<Generated> {
    Ok(Generated {
        success: true,
        count: ctx.state().jobs.len().await,
        source: None,
    })
}

async fn get_by_id(ctx: Arc<Context>, input: ById) -> anyhow::Result<Option<Job>> {
    Ok(ctx.state().jobs.get_by_id(input.id).await)
}
