use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application the user is tracking through the hiring pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTrackerItem {
    pub id: i64,
    pub user_id: i64,
    pub company: String,
    pub position: String,
    pub status: String,
    pub applied_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTrackerPatch {
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl JobTrackerItem {
    pub fn merge(&mut self, patch: JobTrackerPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        self.updated_at = Utc::now();
    }
}
