use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::bookmark::Difficulty;

pub const STATUS_IN_PROGRESS: &str = "in_progress";

/// Practice interview session run against the AI interviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockSession {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,
    pub difficulty: Difficulty,
    pub target_position: String,
    pub status: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockSessionPatch {
    pub status: Option<String>,
    pub score: Option<f64>,
    pub feedback: Option<String>,
}

impl MockSession {
    pub fn start(user_id: i64, topic: String, difficulty: Difficulty, target_position: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            topic,
            difficulty,
            target_position,
            status: STATUS_IN_PROGRESS.to_string(),
            score: None,
            feedback: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merge(&mut self, patch: MockSessionPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(score) = patch.score {
            self.score = Some(score);
        }
        if let Some(feedback) = patch.feedback {
            self.feedback = Some(feedback);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockMessage {
    pub id: i64,
    pub session_id: i64,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Scores and advice produced after a finished session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub id: i64,
    pub user_id: i64,
    pub session_id: i64,
    pub overall_score: f64,
    pub technical_score: f64,
    pub communication_score: f64,
    pub problem_solving_score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_in_progress_without_score() {
        let s = MockSession::start(1, "Rust".into(), Difficulty::Hard, "Backend".into());
        assert_eq!(s.status, "in_progress");
        assert!(s.score.is_none());
        assert!(s.feedback.is_none());
    }

    #[test]
    fn merge_applies_score_and_keeps_status() {
        let mut s = MockSession::start(1, "Rust".into(), Difficulty::Easy, "Backend".into());
        s.merge(MockSessionPatch {
            score: Some(88.5),
            ..Default::default()
        });
        assert_eq!(s.score, Some(88.5));
        assert_eq!(s.status, "in_progress");
    }
}
