// models/mod.rs - records held by the in-memory stores
//
// All records serialize with camelCase keys. Partial updates go through an
// explicit patch type per entity with named optional fields.

pub mod bookmark;
pub mod interview;
pub mod job;
pub mod job_tracker;
pub mod knowledge_base;
pub mod mock_interview;
pub mod preferences;

pub use bookmark::{Bookmark, Difficulty};
pub use interview::Interview;
pub use job::{Job, JobSource};
pub use job_tracker::{JobTrackerItem, JobTrackerPatch};
pub use knowledge_base::KnowledgeBase;
pub use mock_interview::{AssessmentReport, MessageRole, MockMessage, MockSession, MockSessionPatch};
pub use preferences::{PreferencesPatch, UserPreferences};

/// Implement `store::Entity` for records with an `id: i64` field
macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::store::Entity for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn set_id(&mut self, id: i64) {
                    self.id = id;
                }
            }
        )+
    };
}

impl_entity!(
    Bookmark,
    Interview,
    Job,
    JobTrackerItem,
    KnowledgeBase,
    MockSession,
    MockMessage,
    AssessmentReport,
    UserPreferences,
);
