use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const VALUES: [&'static str; 3] = ["easy", "medium", "hard"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Interview question saved for later practice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,
    pub question: String,
    pub difficulty: Difficulty,
    pub target_position: Option<String>,
    pub notes: Option<String>,
    pub category: String,
    pub practice_count: u32,
    pub last_practiced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(user_id: i64, topic: String, question: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            topic,
            question,
            difficulty: Difficulty::default(),
            target_position: None,
            notes: None,
            category: DEFAULT_CATEGORY.to_string(),
            practice_count: 0,
            last_practiced_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn matches(&self, topic: &str, question: &str) -> bool {
        self.topic == topic && self.question == question
    }

    pub fn record_practice(&mut self) {
        let now = Utc::now();
        self.practice_count += 1;
        self.last_practiced_at = Some(now);
    }

    pub fn set_notes(&mut self, notes: String) {
        self.notes = Some(notes);
        self.updated_at = Utc::now();
    }

    pub fn set_category(&mut self, category: String) {
        self.category = category;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bookmark_defaults() {
        let b = Bookmark::new(1, "Arrays".into(), "Reverse a list".into());
        assert_eq!(b.difficulty, Difficulty::Medium);
        assert_eq!(b.category, "General");
        assert_eq!(b.practice_count, 0);
        assert!(b.last_practiced_at.is_none());
    }

    #[test]
    fn practice_increments_and_stamps() {
        let mut b = Bookmark::new(1, "Graphs".into(), "BFS".into());
        b.record_practice();
        b.record_practice();
        assert_eq!(b.practice_count, 2);
        assert!(b.last_practiced_at.is_some());
    }

    #[test]
    fn serializes_camel_case() {
        let v = serde_json::to_value(Bookmark::new(1, "a".into(), "b".into())).unwrap();
        assert_eq!(v["practiceCount"], 0);
        assert_eq!(v["difficulty"], "medium");
        assert!(v["lastPracticedAt"].is_null());
    }
}
