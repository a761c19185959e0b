// handlers/public/system.rs - service health and procedure listing

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rpc::{Context, Procedure, RegistrationError, Router};
use crate::types::{AuthRequirement, OperationKind};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("health", Procedure::public().query(health))
        .procedure("procedures", Procedure::public().query(procedures))
        .build()
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub timestamp: DateTime<Utc>,
}

async fn health(_ctx: Arc<Context>, _: ()) -> anyhow::Result<Health> {
    Ok(Health {
        ok: true,
        timestamp: Utc::now(),
    })
}

#[derive(Debug, Serialize)]
pub struct ProcedureEntry {
    pub path: String,
    pub kind: OperationKind,
    pub auth: AuthRequirement,
}

/// Every callable path of the router serving this call, sorted
async fn procedures(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<ProcedureEntry>> {
    let router = ctx
        .router()
        .ok_or_else(|| anyhow::anyhow!("procedure listing requested outside a dispatch"))?;
    Ok(router
        .shape()
        .into_iter()
        .map(|shape| ProcedureEntry {
            path: shape.path,
            kind: shape.kind,
            auth: shape.auth,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::Harness;
    use serde_json::Value;

    #[tokio::test]
    async fn health_reports_ok() {
        let h = Harness::new(Router::builder().nest("system", router().unwrap()).build().unwrap());
        let data = h.query("system.health", Value::Null).await;
        assert_eq!(data["ok"], true);
        assert!(data["timestamp"].is_string());
    }

    #[tokio::test]
    async fn procedures_lists_the_served_tree() {
        let h = Harness::new(Router::builder().nest("system", router().unwrap()).build().unwrap());
        let data = h.query("system.procedures", Value::Null).await;
        let paths: Vec<&str> = data
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["path"].as_str())
            .collect();
        assert_eq!(paths, vec!["system.health", "system.procedures"]);
    }

    #[tokio::test]
    async fn procedures_lists_the_app_tree_sorted() {
        let h = Harness::new(crate::handlers::app_router().unwrap());
        let data = h.query("system.procedures", Value::Null).await;
        let paths: Vec<&str> = data
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|e| e["path"].as_str())
            .collect();
        assert!(paths.contains(&"bookmarks.add"));
        assert!(paths.contains(&"mockInterview.messages.list"));
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }
}
