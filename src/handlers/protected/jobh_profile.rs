// handlers/protected/jobh_profile.rs - public job-hunt profile

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure("get", Procedure::protected().query(get))
        .procedure("stats", Procedure::protected().query(stats))
        .procedure(
            "update",
            Procedure::protected()
                .input(
                    Contract::object()
                        .optional("name", FieldKind::String)
                        .optional("title", FieldKind::String)
                        .optional("bio", FieldKind::String)
                        .optional("skills", FieldKind::array_of(FieldKind::String)),
                )
                .mutation(update),
        )
        .build()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    id: i64,
    user_id: i64,
    name: &'static str,
    title: &'static str,
    bio: &'static str,
    skills: Vec<&'static str>,
    experience: &'static str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

async fn get(ctx: Arc<Context>, _: ()) -> anyhow::Result<Profile> {
    let user_id = ctx.require_principal()?.id;
    let now = Utc::now();
    Ok(Profile {
        id: 1,
        user_id,
        name: "Demo User",
        title: "Software Engineer",
        bio: "Passionate about building great software",
        skills: vec!["JavaScript", "React", "Node.js"],
        experience: "5 years",
        created_at: now,
        updated_at: now,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    total_applications: u32,
    active_applications: u32,
    interviews: u32,
    offers: u32,
    response_rate: u32,
}

async fn stats(_ctx: Arc<Context>, _: ()) -> anyhow::Result<Stats> {
    Ok(Stats {
        total_applications: 12,
        active_applications: 5,
        interviews: 3,
        offers: 1,
        response_rate: 42,
    })
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct Updated {
    success: bool,
    #[serde(flatten)]
    fields: ProfileUpdate,
}

/// Echoes the accepted fields; nothing is persisted
async fn update(_ctx: Arc<Context>, input: ProfileUpdate) -> anyhow::Result<Updated> {
    Ok(Updated {
        success: true,
        fields: input,
    })
}
