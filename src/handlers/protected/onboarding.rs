// handlers/protected/onboarding.rs - first-run profile capture

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure(
            "saveProfile",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("name", FieldKind::String)
                        .required("targetRole", FieldKind::String)
                        .required("experience", FieldKind::String)
                        .required("skills", FieldKind::array_of(FieldKind::String)),
                )
                .mutation(save_profile),
        )
        .procedure(
            "parseResume",
            Procedure::protected()
                .input(Contract::object().required("resumeText", FieldKind::String))
                .mutation(parse_resume),
        )
        .build()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    name: String,
    target_role: String,
    experience: String,
    skills: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Saved<T> {
    success: bool,
    #[serde(flatten)]
    profile: T,
}

async fn save_profile(_ctx: Arc<Context>, input: Profile) -> anyhow::Result<Saved<Profile>> {
    Ok(Saved {
        success: true,
        profile: input,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResumeText {
    resume_text: String,
}

#[derive(Debug, Serialize)]
struct ParsedProfile {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    skills: [&'static str; 4],
    experience: &'static str,
    education: &'static str,
}

/// Canned extraction; the resume text is not inspected
async fn parse_resume(_ctx: Arc<Context>, input: ResumeText) -> anyhow::Result<ParsedProfile> {
    tracing::debug!(chars = input.resume_text.len(), "Parsing resume text");
    Ok(ParsedProfile {
        name: "John Doe",
        email: "john@example.com",
        phone: "+1234567890",
        skills: ["JavaScript", "React", "Node.js", "TypeScript"],
        experience: "5 years",
        education: "BS Computer Science",
    })
}
