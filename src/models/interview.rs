use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A real interview the user has scheduled or attended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: i64,
    pub user_id: i64,
    pub company: String,
    pub position: String,
    pub interview_date: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
