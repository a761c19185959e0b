use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    Manual,
    Linkedin,
    AiGenerated,
}

/// Job recommendation matched for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub user_id: i64,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub match_percentage: u8,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub job_type: Option<String>,
    pub work_type: Option<String>,
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub linkedin_url: Option<String>,
    pub source: JobSource,
    pub posted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
