// state.rs - process-wide application state
//
// Built once at startup and handed to every call through its Context.

use std::sync::Arc;

use chrono::Utc;

use crate::config::AppConfig;
use crate::models::{
    AssessmentReport, Bookmark, Interview, Job, JobTrackerItem, KnowledgeBase, MockMessage,
    MockSession, UserPreferences,
};
use crate::store::{seed, MemoryStore};

#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub bookmarks: MemoryStore<Bookmark>,
    pub preferences: MemoryStore<UserPreferences>,
    pub jobs: MemoryStore<Job>,
    pub interviews: MemoryStore<Interview>,
    pub mock_sessions: MemoryStore<MockSession>,
    pub mock_messages: MemoryStore<MockMessage>,
    pub assessment_reports: MemoryStore<AssessmentReport>,
    pub knowledge_bases: MemoryStore<KnowledgeBase>,
    pub job_tracker: MemoryStore<JobTrackerItem>,
}

impl AppState {
    /// State with every store seeded with demo records
    pub fn init(config: AppConfig) -> Arc<Self> {
        let now = Utc::now();
        tracing::debug!("Seeding in-memory stores");

        Arc::new(Self {
            config,
            bookmarks: MemoryStore::seeded(seed::bookmarks(now)),
            preferences: MemoryStore::seeded(seed::preferences(now)),
            jobs: MemoryStore::seeded(seed::jobs(now)),
            interviews: MemoryStore::seeded(seed::interviews(now)),
            mock_sessions: MemoryStore::seeded(seed::mock_sessions(now)),
            mock_messages: MemoryStore::seeded(seed::mock_messages(now)),
            assessment_reports: MemoryStore::seeded(seed::assessment_reports(now)),
            knowledge_bases: MemoryStore::seeded(seed::knowledge_bases(now)),
            job_tracker: MemoryStore::seeded(seed::job_tracker_items(now)),
        })
    }
}
