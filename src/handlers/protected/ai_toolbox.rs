// handlers/protected/ai_toolbox.rs - writing helpers with canned output

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure(
            "generateCoverLetter",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("jobDescription", FieldKind::String)
                        .required("resume", FieldKind::String),
                )
                .mutation(generate_cover_letter),
        )
        .procedure(
            "optimizeResume",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("resume", FieldKind::String)
                        .required("jobDescription", FieldKind::String),
                )
                .mutation(optimize_resume),
        )
        .procedure(
            "generateInterviewQuestions",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("position", FieldKind::String)
                        .required("company", FieldKind::String),
                )
                .mutation(generate_interview_questions),
        )
        .build()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResumeAndJob {
    job_description: String,
    resume: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CoverLetter {
    cover_letter: &'static str,
}

async fn generate_cover_letter(_ctx: Arc<Context>, input: ResumeAndJob) -> anyhow::Result<CoverLetter> {
    tracing::debug!(
        job_chars = input.job_description.len(),
        resume_chars = input.resume.len(),
        "Generating cover letter"
    );
    Ok(CoverLetter {
        cover_letter: "Dear Hiring Manager,\n\nI am excited to apply for this position...",
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptimizedResume {
    optimized_resume: &'static str,
    suggestions: Vec<&'static str>,
}

async fn optimize_resume(_ctx: Arc<Context>, input: ResumeAndJob) -> anyhow::Result<OptimizedResume> {
    tracing::debug!(
        job_chars = input.job_description.len(),
        resume_chars = input.resume.len(),
        "Optimizing resume"
    );
    Ok(OptimizedResume {
        optimized_resume: "Optimized resume content...",
        suggestions: vec![
            "Add more quantifiable achievements",
            "Highlight relevant skills",
        ],
    })
}

#[derive(Debug, Deserialize)]
struct Opening {
    position: String,
    company: String,
}

#[derive(Debug, Serialize)]
struct InterviewQuestions {
    questions: Vec<&'static str>,
}

async fn generate_interview_questions(_ctx: Arc<Context>, input: Opening) -> anyhow::Result<InterviewQuestions> {
    tracing::debug!(position = %input.position, company = %input.company, "Generating interview questions");
    Ok(InterviewQuestions {
        questions: vec![
            "Tell me about yourself",
            "Why do you want to work at this company?",
            "What are your strengths and weaknesses?",
        ],
    })
}
