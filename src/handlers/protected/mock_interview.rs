// handlers/protected/mock_interview.rs - practice sessions, their transcript and assessment
//
// mockInterview.{list,create,getById,update}
// mockInterview.messages.{list,create}
// mockInterview.assessmentReport.{get,list,create}

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use crate::handlers::{by_id, ById};
use crate::models::{
    AssessmentReport, Difficulty, MessageRole, MockMessage, MockSession, MockSessionPatch,
};
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
                        .required("topic", FieldKind::String)
                        .required("difficulty", FieldKind::one_of(&Difficulty::VALUES))
                        .required("targetPosition", FieldKind::String),
                )
                .mutation(create),
        )
        .procedure("getById", Procedure::protected().input(by_id()).query(get_by_id))
        .procedure(
            "update",
            Procedure::protected()
                .input(
                    by_id()
                        .optional("status", FieldKind::String)
                        .optional("score", FieldKind::Number)
                        .optional("feedback", FieldKind::String),
                )
                .mutation(update),
        )
        .nest("messages", messages_router()?)
        .nest("assessmentReport", assessment_router()?)
        .build()
}

fn by_session() -> Contract {
    Contract::object().required("sessionId", FieldKind::Integer)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BySession {
    session_id: i64,
}

async fn list(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<MockSession>> {
    Ok(ctx.state().mock_sessions.list().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateInput {
    topic: String,
    difficulty: Difficulty,
    target_position: String,
}

async fn create(ctx: Arc<Context>, input: CreateInput) -> anyhow::Result<MockSession> {
    let user_id = ctx.require_principal()?.id;
    let session = MockSession::start(user_id, input.topic, input.difficulty, input.target_position);
    let session = ctx.state().mock_sessions.insert(session).await;
    tracing::info!(session_id = session.id, "Mock interview session started");
    Ok(session)
}

async fn get_by_id(ctx: Arc<Context>, input: ById) -> anyhow::Result<Option<MockSession>> {
    Ok(ctx.state().mock_sessions.get_by_id(input.id).await)
}

#[derive(Debug, Deserialize)]
struct UpdateInput {
    id: i64,
    #[serde(flatten)]
    patch: MockSessionPatch,
}

async fn update(ctx: Arc<Context>, input: UpdateInput) -> anyhow::Result<Option<MockSession>> {
    let patch = input.patch;
    Ok(ctx
        .state()
        .mock_sessions
        .update(input.id, move |s: &mut MockSession| s.merge(patch))
        .await)
}

// messages

fn messages_router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("list", Procedure::protected().input(by_session()).query(list_messages))
        .procedure(
            "create",
            Procedure::protected()
                .input(
                    by_session()
                        .required("role", FieldKind::one_of(&["user", "assistant"]))
                        .required("content", FieldKind::String),
                )
                .mutation(create_message),
        )
        .build()
}

async fn list_messages(ctx: Arc<Context>, input: BySession) -> anyhow::Result<Vec<MockMessage>> {
    Ok(ctx
        .state()
        .mock_messages
        .filter(|m| m.session_id == input.session_id)
        .await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageInput {
    session_id: i64,
    role: MessageRole,
    content: String,
}

async fn create_message(ctx: Arc<Context>, input: MessageInput) -> anyhow::Result<MockMessage> {
    let message = MockMessage {
        id: 0,
        session_id: input.session_id,
        role: input.role,
        content: input.content,
        created_at: Utc::now(),
    };
    Ok(ctx.state().mock_messages.insert(message).await)
}

// assessment reports

fn assessment_router() -> Result<Router, RegistrationError> {
    let scores = ["overallScore", "technicalScore", "communicationScore", "problemSolvingScore"];
    let lists = ["strengths", "weaknesses", "recommendations"];

    let create_contract = scores
        .iter()
        .fold(by_session(), |c, name| c.required(name, FieldKind::Number));
    let create_contract = lists.iter().fold(create_contract, |c, name| {
        c.required(name, FieldKind::array_of(FieldKind::String))
    });

    Router::builder()
        .procedure("get", Procedure::protected().input(by_session()).query(get_report))
        .procedure("list", Procedure::protected().query(list_reports))
        .procedure(
            "create",
            Procedure::protected().input(create_contract).mutation(create_report),
        )
        .build()
}

async fn get_report(ctx: Arc<Context>, input: BySession) -> anyhow::Result<Option<AssessmentReport>> {
    Ok(ctx
        .state()
        .assessment_reports
        .find(|r| r.session_id == input.session_id)
        .await)
}

async fn list_reports(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<AssessmentReport>> {
    Ok(ctx.state().assessment_reports.list().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportInput {
    session_id: i64,
    overall_score: f64,
    technical_score: f64,
    communication_score: f64,
    problem_solving_score: f64,
    strengths: Vec<String>,
    weaknesses: Vec<String>,
    recommendations: Vec<String>,
}

async fn create_report(ctx: Arc<Context>, input: ReportInput) -> anyhow::Result<AssessmentReport> {
    let user_id = ctx.require_principal()?.id;
    let report = AssessmentReport {
        id: 0,
        user_id,
        session_id: input.session_id,
        overall_score: input.overall_score,
        technical_score: input.technical_score,
        communication_score: input.communication_score,
        problem_solving_score: input.problem_solving_score,
        strengths: input.strengths,
        weaknesses: input.weaknesses,
        recommendations: input.recommendations,
        created_at: Utc::now(),
    };
    Ok(ctx.state().assessment_reports.insert(report).await)
}
