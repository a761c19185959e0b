mod common;

use anyhow::Result;
use common::{mock_config, TestServer};
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::start(mock_config()).await?;

    let resp = server.client().get(server.url("/health")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn root_describes_the_api() -> Result<()> {
    let server = TestServer::start(mock_config()).await?;

    let body: Value = server.client().get(server.url("/")).send().await?.json().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "JobPrep API");
    assert!(body["data"]["procedures"].as_u64().unwrap_or(0) > 50);
    Ok(())
}

#[tokio::test]
async fn system_health_is_a_public_query() -> Result<()> {
    let server = TestServer::start(common::jwt_config()).await?;

    let call = server.query("system.health", None, None).await?;
    assert_eq!(call.status, StatusCode::OK);
    assert!(call.is_success());
    assert_eq!(call.data()["ok"], true);
    Ok(())
}

#[tokio::test]
async fn system_procedures_lists_the_namespace() -> Result<()> {
    let server = TestServer::start(mock_config()).await?;

    let call = server.query("system.procedures", None, None).await?;
    let listed = call.data().as_array().cloned().unwrap_or_default();
    let find = |path: &str| listed.iter().find(|p| p["path"] == path).cloned();

    let add = find("bookmarks.add").expect("bookmarks.add listed");
    assert_eq!(add["kind"], "mutation");
    assert_eq!(add["auth"], "protected");

    let me = find("auth.me").expect("auth.me listed");
    assert_eq!(me["kind"], "query");
    assert_eq!(me["auth"], "public");

    assert!(find("mockInterview.messages.create").is_some());
    Ok(())
}
