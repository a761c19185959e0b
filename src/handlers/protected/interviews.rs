// handlers/protected/interviews.rs - interview history

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::handlers::{by_id, ById, Success};
use crate::models::Interview;
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
                        .required("interviewDate", FieldKind::Date)
                        .required("status", FieldKind::String)
                        .optional("notes", FieldKind::String),
                )
                .mutation(create),
        )
        .procedure("getById", Procedure::protected().input(by_id()).query(get_by_id))
        .procedure("delete", Procedure::protected().input(by_id()).mutation(delete))
        .build()
}

async fn list(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<Interview>> {
    Ok(ctx.state().interviews.list().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInput {
    company: String,
    position: String,
    interview_date: DateTime<Utc>,
    status: String,
    notes: Option<String>,
}

async fn create(ctx: Arc<Context>, input: CreateInput) -> anyhow::Result<Interview> {
    let user_id = ctx.require_principal()?.id;
    let now = Utc::now();
    let interview = Interview {
        id: 0,
        user_id,
        company: input.company,
        position: input.position,
        interview_date: input.interview_date,
        status: input.status,
        notes: input.notes,
        created_at: now,
        updated_at: now,
    };
    Ok(ctx.state().interviews.insert(interview).await)
}

async fn get_by_id(ctx: Arc<Context>, input: ById) -> anyhow::Result<Option<Interview>> {
    Ok(ctx.state().interviews.get_by_id(input.id).await)
}

async fn delete(ctx: Arc<Context>, input: ById) -> anyhow::Result<Success> {
    ctx.state().interviews.delete(input.id).await;
    Ok(Success::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::Harness;
    use crate::types::OperationKind;
    use serde_json::{json, Value};

    fn harness() -> Harness {
        Harness::new(Router::builder().nest("interviews", router().unwrap()).build().unwrap())
    }

    #[tokio::test]
    async fn create_normalizes_the_date_and_round_trips() {
        let h = harness();
        let created = h
            .mutate(
                "interviews.create",
                json!({
                    "company": "Acme",
                    "position": "Engineer",
                    "interviewDate": "2026-03-01T09:30:00+02:00",
                    "status": "scheduled"
                }),
            )
            .await;
        assert_eq!(created["interviewDate"], "2026-03-01T07:30:00Z");
        assert!(created["notes"].is_null());

        let fetched = h.query("interviews.getById", json!({"id": created["id"]})).await;
        assert_eq!(fetched, created);

        h.mutate("interviews.delete", json!({"id": created["id"]})).await;
        let gone = h.query("interviews.getById", json!({"id": created["id"]})).await;
        assert_eq!(gone, Value::Null);
    }

    #[tokio::test]
    async fn create_rejects_bad_dates() {
        let kind = harness()
            .error_kind(
                "interviews.create",
                OperationKind::Mutation,
                json!({"company": "Acme", "position": "Engineer", "interviewDate": "tomorrow", "status": "x"}),
            )
            .await;
        assert_eq!(kind, Some("BAD_INPUT"));
    }
}
