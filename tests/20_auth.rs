mod common;

use anyhow::Result;
use common::{jwt_config, mock_config, real_user, TestServer};
use reqwest::{header, StatusCode};
use serde_json::json;

#[tokio::test]
async fn protected_mutation_without_session_is_unauthorized() -> Result<()> {
    let server = TestServer::start(jwt_config()).await?;

    let call = server
        .mutate("bookmarks.add", Some(json!({"topic": "Arrays", "question": "Reverse a list"})), None)
        .await?;

    assert_eq!(call.status, StatusCode::UNAUTHORIZED);
    assert_eq!(call.error_kind(), Some("UNAUTHORIZED"));
    assert_eq!(call.body["message"], "Please login (10001)");

    // Nothing was stored
    let token = server.token_for(&real_user(7))?;
    let listed = server.query("bookmarks.list", None, Some(&token)).await?;
    assert_eq!(listed.data().as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn bearer_token_authenticates() -> Result<()> {
    let server = TestServer::start(jwt_config()).await?;
    let token = server.token_for(&real_user(42))?;

    let me = server.query("auth.me", None, Some(&token)).await?;
    assert_eq!(me.data()["id"], 42);
    assert_eq!(me.data()["openId"], "oauth|42");

    let added = server
        .mutate("bookmarks.add", Some(json!({"topic": "Graphs", "question": "BFS"})), Some(&token))
        .await?;
    assert!(added.is_success());
    assert_eq!(added.data()["userId"], 42);
    Ok(())
}

#[tokio::test]
async fn session_cookie_authenticates() -> Result<()> {
    let server = TestServer::start(jwt_config()).await?;
    let token = server.token_for(&real_user(9))?;

    let resp = server
        .client()
        .get(server.procedure_url("preferences.get"))
        .header(header::COOKIE, format!("theme=dark; app_session_id={}", token))
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn token_signed_with_another_secret_is_ignored() -> Result<()> {
    let server = TestServer::start(jwt_config()).await?;

    let mut other = jwt_config();
    other.auth.jwt_secret = "some-other-secret".to_string();
    let forged = jobprep_api::auth::issue_session_token(&real_user(5), &other.auth)?;

    let call = server.query("jobs.list", None, Some(&forged)).await?;
    assert_eq!(call.status, StatusCode::UNAUTHORIZED);

    let me = server.query("auth.me", None, Some(&forged)).await?;
    assert_eq!(me.data()["openId"], "mock-user-001");
    Ok(())
}

#[tokio::test]
async fn mock_mode_signs_everyone_in_as_the_placeholder() -> Result<()> {
    let server = TestServer::start(mock_config()).await?;

    let call = server
        .mutate("bookmarks.add", Some(json!({"topic": "Arrays", "question": "Reverse a list"})), None)
        .await?;
    assert!(call.is_success());
    assert_eq!(call.data()["userId"], 1);
    Ok(())
}

#[tokio::test]
async fn logout_expires_the_session_cookie() -> Result<()> {
    let server = TestServer::start(jwt_config()).await?;

    let call = server.mutate("auth.logout", None, None).await?;
    assert_eq!(call.status, StatusCode::OK);
    assert_eq!(call.data(), &json!({"success": true}));

    assert_eq!(call.cookies.len(), 1);
    let cookie = &call.cookies[0];
    assert!(cookie.starts_with("app_session_id=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    Ok(())
}

#[tokio::test]
async fn bearer_token_is_used_when_the_cookie_is_stale() -> Result<()> {
    let server = TestServer::start(jwt_config()).await?;
    let token = server.token_for(&real_user(12))?;

    let resp = server
        .client()
        .get(server.procedure_url("auth.me"))
        .header(header::COOKIE, "app_session_id=expired.session.token")
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["data"]["id"], 12);
    Ok(())
}
