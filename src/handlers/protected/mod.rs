// handlers/protected/mod.rs - Protected procedures (principal required)
//
// Security Level: the dispatcher rejects calls without a principal before
// input validation, so handlers may rely on `ctx.require_principal()`.
// Record lookups by id return null when the record does not exist.

pub mod ai_toolbox;
pub mod bookmarks;
pub mod interviews;
pub mod job_tracker;
pub mod jobh_profile;
pub mod jobs;
pub mod knowledge_base;
pub mod linkedin;
pub mod mock_interview;
pub mod onboarding;
pub mod preferences;
pub mod resume;
pub mod skill_analysis;
pub mod topic_practice;
