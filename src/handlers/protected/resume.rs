// handlers/protected/resume.rs - stored resumes and parsing

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("list", Procedure::protected().query(list))
        .procedure(
            "parse",
            Procedure::protected()
                .input(Contract::object().required("content", FieldKind::String))
                .mutation(parse),
        )
        .build()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Resume {
    id: i64,
    user_id: i64,
    name: &'static str,
    content: &'static str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Two fixed resumes, timestamped relative to now
async fn list(ctx: Arc<Context>, _: ()) -> anyhow::Result<Vec<Resume>> {
    let user_id = ctx.require_principal()?.id;
    let now = Utc::now();
    Ok(vec![
        Resume {
            id: 1,
            user_id,
            name: "Software Engineer Resume",
            content: "John Doe\nSoftware Engineer\n...",
            created_at: now - Duration::days(7),
            updated_at: now - Duration::days(2),
        },
        Resume {
            id: 2,
            user_id,
            name: "Senior Developer Resume",
            content: "John Doe\nSenior Developer\n...",
            created_at: now - Duration::days(14),
            updated_at: now - Duration::days(5),
        },
    ])
}

#[derive(Debug, Deserialize)]
struct ParseInput {
    content: String,
}

#[derive(Debug, Serialize)]
struct ParsedResume {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    skills: Vec<&'static str>,
    experience: Vec<&'static str>,
    education: Vec<&'static str>,
}

async fn parse(_ctx: Arc<Context>, input: ParseInput) -> anyhow::Result<ParsedResume> {
    tracing::debug!(chars = input.content.len(), "Parsing resume");
    Ok(ParsedResume {
        name: "John Doe",
        email: "john@example.com",
        phone: "+1234567890",
        skills: vec!["JavaScript", "React", "Node.js"],
        experience: vec!["Software Engineer at Tech Corp (2020-2023)"],
        education: vec!["BS Computer Science, University (2016-2020)"],
    })
}
