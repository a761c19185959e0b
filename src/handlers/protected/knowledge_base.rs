// handlers/protected/knowledge_base.rs - per-company knowledge bases

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::handlers::{by_id, ById};
use crate::models::KnowledgeBase;
use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};
use crate::store::Store;

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("list", Procedure::protected().query(list))
        .procedure("getById", Procedure::protected().input(by_id()).query(get_by_id))
        .procedure(
            "getOrCreate",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("name", FieldKind::String)
                        .optional("description", FieldKind::String),
                )
                .mutation(get_or_create),
        )
        .procedure(
            "search",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("query", FieldKind::String)
                        .optional("knowledgeBaseId", FieldKind::Integer),
                )
                .query(search),
        )
        .build()
}

async fn list(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<KnowledgeBase>> {
    Ok(ctx.state().knowledge_bases.list().await)
}

async fn get_by_id(ctx: Arc<Context>, input: ById) -> anyhow::Result<Option<KnowledgeBase>> {
    Ok(ctx.state().knowledge_bases.get_by_id(input.id).await)
}

#[derive(Debug, Deserialize)]
struct GetOrCreateInput {
    name: String,
    description: Option<String>,
}

/// Existing knowledge base with this name, or a new empty one
async fn get_or_create(ctx: Arc<Context>, input: GetOrCreateInput) -> anyhow::Result<KnowledgeBase> {
    let user_id = ctx.require_principal()?.id;
    let GetOrCreateInput { name, description } = input;
    let kb = ctx
        .state()
        .knowledge_bases
        .find_or_insert(
            |kb| kb.name == name,
            || KnowledgeBase::new(user_id, name.clone(), description),
        )
        .await;
    Ok(kb)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchInput {
    query: String,
    knowledge_base_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchStatistics {
    total_searches: u32,
    avg_response_time: u32,
}

#[derive(Debug, Serialize)]
struct SearchResults {
    results: Vec<String>,
    statistics: SearchStatistics,
}

async fn search(_ctx: Arc<Context>, input: SearchInput) -> anyhow::Result<SearchResults> {
    tracing::debug!(query = %input.query, knowledge_base_id = ?input.knowledge_base_id, "Knowledge base search");
    Ok(SearchResults {
        results: (1..=3).map(|i| format!("Result {}", i)).collect(),
        statistics: SearchStatistics {
            total_searches: 42,
            avg_response_time: 150,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::Harness;
    use serde_json::{json, Value};

    fn harness() -> Harness {
        Harness::new(Router::builder().nest("knowledgeBase", router().unwrap()).build().unwrap())
    }

    #[tokio::test]
    async fn get_or_create_reuses_by_name() {
        let h = harness();
        let first = h
            .mutate("knowledgeBase.getOrCreate", json!({"name": "Stripe"}))
            .await;
        assert_eq!(first["description"], "");
        assert_eq!(first["content"], "");

        let second = h
            .mutate("knowledgeBase.getOrCreate", json!({"name": "Stripe", "description": "ignored"}))
            .await;
        assert_eq!(first, second);

        let all = h.query("knowledgeBase.list", Value::Null).await;
        let named: Vec<_> = all.as_array().unwrap().iter().filter(|kb| kb["name"] == "Stripe").collect();
        assert_eq!(named.len(), 1);
    }

    #[tokio::test]
    async fn search_returns_canned_results() {
        let data = harness()
            .query("knowledgeBase.search", json!({"query": "system design"}))
            .await;
        assert_eq!(data["results"], json!(["Result 1", "Result 2", "Result 3"]));
        assert_eq!(data["statistics"]["totalSearches"], 42);
    }
}
