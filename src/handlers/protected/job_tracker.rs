// handlers/protected/job_tracker.rs - application pipeline tracking

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::handlers::{by_id, ById, Success};
use crate::models::{JobTrackerItem, JobTrackerPatch};
use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};
use crate::store::Store;

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("list", Procedure::protected().query(list))
        .procedure(
            "create",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("company", FieldKind::String)
                        .required("position", FieldKind::String)
                        .required("status", FieldKind::String)
                        .required("appliedDate", FieldKind::Date)
                        .optional("notes", FieldKind::String),
                )
                .mutation(create),
        )
        .procedure(
            "update",
            Procedure::protected()
                .input(
                    by_id()
                        .optional("status", FieldKind::String)
                        .optional("notes", FieldKind::String),
                )
                .mutation(update),
        )
        .procedure("delete", Procedure::protected().input(by_id()).mutation(delete))
        .build()
}

async fn list(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<JobTrackerItem>> {
    Ok(ctx.state().job_tracker.list().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInput {
    company: String,
    position: String,
    status: String,
    applied_date: DateTime<Utc>,
    notes: Option<String>,
}

async fn create(ctx: Arc<Context>, input: CreateInput) -> anyhow::Result<JobTrackerItem> {
    let user_id = ctx.require_principal()?.id;
    let now = Utc::now();
    let item = JobTrackerItem {
        id: 0,
        user_id,
        company: input.company,
        position: input.position,
        status: input.status,
        applied_date: input.applied_date,
        notes: input.notes,
        created_at: now,
        updated_at: now,
    };
    Ok(ctx.state().job_tracker.insert(item).await)
}

#[derive(Debug, Deserialize)]
struct UpdateInput {
    id: i64,
    #[serde(flatten)]
    patch: JobTrackerPatch,
}

async fn update(ctx: Arc<Context>, input: UpdateInput) -> anyhow::Result<Option<JobTrackerItem>> {
    let patch = input.patch;
    Ok(ctx
        .state()
        .job_tracker
        .update(input.id, move |item: &mut JobTrackerItem| item.merge(patch))
        .await)
}

async fn delete(ctx: Arc<Context>, input: ById) -> anyhow::Result<Success> {
    ctx.state().job_tracker.delete(input.id).await;
    Ok(Success::ok())
}
