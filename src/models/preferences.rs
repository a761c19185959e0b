use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Job matching preferences, one record per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub id: i64,
    pub user_id: i64,
    pub employment_types: Vec<String>,
    pub work_mode: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a `preferences.save` call may touch; absent fields keep their value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub employment_types: Option<Vec<String>>,
    pub work_mode: Option<String>,
    pub location: Option<String>,
}

impl UserPreferences {
    pub fn empty(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            employment_types: Vec::new(),
            work_mode: None,
            location: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn merge(&mut self, patch: PreferencesPatch) {
        if let Some(employment_types) = patch.employment_types {
            self.employment_types = employment_types;
        }
        if let Some(work_mode) = patch.work_mode {
            self.work_mode = Some(work_mode);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        self.updated_at = Utc::now();
    }
}
