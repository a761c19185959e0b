use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KnowledgeBase {
    pub fn new(user_id: i64, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            name,
            description: description.unwrap_or_default(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
