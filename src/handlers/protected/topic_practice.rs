// handlers/protected/topic_practice.rs - single-question practice

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::models::Difficulty;
use crate::rpc::{Context, Contract, FieldKind, Procedure, RegistrationError, Router};

pub fn router() -> Result<Router, RegistrationError> {
    Router::builder()
        .procedure(
            "generateQuestion",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("topic", FieldKind::String)
                        .required("difficulty", FieldKind::one_of(&Difficulty::VALUES)),
                )
                .mutation(generate_question),
        )
        .procedure(
            "submitAnswer",
            Procedure::protected()
                .input(
                    Contract::object()
                        .required("questionId", FieldKind::String)
                        .required("answer", FieldKind::String),
                )
                .mutation(submit_answer),
        )
        .build()
}

#[derive(Debug, Deserialize)]
struct QuestionRequest {
    topic: String,
    difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
struct GeneratedQuestion {
    question: String,
    hints: Vec<&'static str>,
    solution: &'static str,
}

async fn generate_question(_ctx: Arc<Context>, input: QuestionRequest) -> anyhow::Result<GeneratedQuestion> {
    Ok(GeneratedQuestion {
        question: format!("Sample {} question about {}", input.difficulty.as_str(), input.topic),
        hints: vec!["Hint 1", "Hint 2"],
        solution: "Sample solution",
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Answer {
    question_id: String,
    answer: String,
}

#[derive(Debug, Serialize)]
struct Grade {
    correct: bool,
    feedback: &'static str,
    score: u32,
}

async fn submit_answer(_ctx: Arc<Context>, input: Answer) -> anyhow::Result<Grade> {
    tracing::debug!(question_id = %input.question_id, chars = input.answer.len(), "Grading answer");
    Ok(Grade {
        correct: true,
        feedback: "Great job!",
        score: 95,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::Harness;
    use serde_json::json;

    #[tokio::test]
    async fn question_mentions_topic_and_difficulty() {
        let h = Harness::new(Router::builder().nest("topicPractice", router().unwrap()).build().unwrap());
        let data = h
            .mutate("topicPractice.generateQuestion", json!({"topic": "Graphs", "difficulty": "easy"}))
            .await;
        assert_eq!(data["question"], "Sample easy question about Graphs");

        let graded = h
            .mutate("topicPractice.submitAnswer", json!({"questionId": "q1", "answer": "BFS"}))
            .await;
        assert_eq!(graded["score"], 95);
    }
}
