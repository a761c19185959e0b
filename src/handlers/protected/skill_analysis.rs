// handlers/protected/skill_analysis.rs - skill gap and market trends

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};

const MATCHED_SKILL_LIMIT: usize = 3;

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure(
            "analyze",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("skills", FieldKind::array_of(FieldKind::String))
                        .required("targetRole", FieldKind::String),
                )
                .mutation(analyze),
        )
        .procedure(
            "getMarketTrends",
            Procedure::protected()
                .input(Contract::object().required("skill", FieldKind::String))
                .query(get_market_trends),
        )
        .build()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeInput {
    skills: Vec<String>,
    target_role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Analysis {
    match_score: u32,
    matched_skills: Vec<String>,
    missing_skills: Vec<&'static str>,
    recommendations: Vec<&'static str>,
}

async fn analyze(_ctx: Arc<Context>, input: AnalyzeInput) -> anyhow::Result<Analysis> {
    tracing::debug!(target_role = %input.target_role, skills = input.skills.len(), "Analyzing skills");
    Ok(Analysis {
        match_score: 85,
        matched_skills: input.skills.into_iter().take(MATCHED_SKILL_LIMIT).collect(),
        missing_skills: vec!["Docker", "Kubernetes"],
        recommendations: vec!["Learn containerization", "Practice system design"],
    })
}

#[derive(Debug, Deserialize)]
struct TrendInput {
    skill: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarketTrend {
    skill: String,
    demand: &'static str,
    trend: &'static str,
    average_salary: &'static str,
    top_companies: Vec<&'static str>,
}

async fn get_market_trends(_ctx: Arc<Context>, input: TrendInput) -> anyhow::Result<MarketTrend> {
    Ok(MarketTrend {
        skill: input.skill,
        demand: "High",
        trend: "Growing",
        average_salary: "$120,000",
        top_companies: vec!["Google", "Meta", "Amazon"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::Harness;
    use serde_json::json;

    fn harness() -> Harness {
        Harness::new(Router::builder().nest("skillAnalysis", router().unwrap()).build().unwrap())
    }

    #[tokio::test]
    async fn matched_skills_are_the_first_three() {
        let data = harness()
            .mutate(
                "skillAnalysis.analyze",
                json!({"skills": ["Rust", "Go", "SQL", "Kafka"], "targetRole": "Backend"}),
            )
            .await;
        assert_eq!(data["matchedSkills"], json!(["Rust", "Go", "SQL"]));
    }

    #[tokio::test]
    async fn trends_echo_the_skill() {
        let data = harness()
            .query("skillAnalysis.getMarketTrends", json!({"skill": "Rust"}))
            .await;
        assert_eq!(data["skill"], "Rust");
        assert_eq!(data["demand"], "High");
    }
}
