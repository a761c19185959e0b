// store/seed.rs - demo records loaded into a fresh AppState

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    AssessmentReport, Bookmark, Difficulty, Interview, Job, JobSource, JobTrackerItem,
    KnowledgeBase, MessageRole, MockMessage, MockSession, UserPreferences,
};

/// Owner of every seeded record; matches the placeholder principal
pub const DEMO_USER_ID: i64 = 1;

fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - Duration::days(days)
}

pub fn bookmarks(now: DateTime<Utc>) -> Vec<Bookmark> {
    let entry = |id, topic: &str, question: &str, difficulty, category: &str, practice_count| Bookmark {
        id,
        user_id: DEMO_USER_ID,
        topic: topic.to_string(),
        question: question.to_string(),
        difficulty,
        target_position: Some("Software Engineer".to_string()),
        notes: None,
        category: category.to_string(),
        practice_count,
        last_practiced_at: (practice_count > 0).then(|| days_ago(now, 1)),
        created_at: days_ago(now, 10),
        updated_at: days_ago(now, 1),
    };

    vec![
        entry(1, "Arrays", "Find two numbers that add up to a target", Difficulty::Easy, "Algorithms", 3),
        entry(2, "System Design", "Design a URL shortener", Difficulty::Hard, "System Design", 1),
        entry(3, "Behavioral", "Tell me about a time you disagreed with a teammate", Difficulty::Medium, "Behavioral", 0),
    ]
}

pub fn preferences(now: DateTime<Utc>) -> Vec<UserPreferences> {
    vec![UserPreferences {
        id: 1,
        user_id: DEMO_USER_ID,
        employment_types: vec!["full-time".to_string()],
        work_mode: Some("hybrid".to_string()),
        location: Some("San Francisco, CA".to_string()),
        created_at: days_ago(now, 30),
        updated_at: days_ago(now, 3),
    }]
}

pub fn jobs(now: DateTime<Utc>) -> Vec<Job> {
    let entry = |id, company: &str, position: &str, location: &str, match_percentage, salary: (f64, f64), source| Job {
        id,
        user_id: DEMO_USER_ID,
        company: company.to_string(),
        position: position.to_string(),
        location: Some(location.to_string()),
        match_percentage,
        salary_min: Some(salary.0),
        salary_max: Some(salary.1),
        job_type: Some("full-time".to_string()),
        work_type: Some("hybrid".to_string()),
        experience_level: Some("mid-senior".to_string()),
        industry: Some("Technology".to_string()),
        description: Some(format!("{} at {}", position, company)),
        linkedin_url: None,
        source,
        posted_at: Some(days_ago(now, id)),
        created_at: days_ago(now, id),
        updated_at: days_ago(now, id),
    };

    vec![
        entry(1, "Google", "Senior Software Engineer", "Mountain View, CA", 92, (180_000.0, 250_000.0), JobSource::Linkedin),
        entry(2, "Meta", "Backend Engineer", "Menlo Park, CA", 87, (170_000.0, 230_000.0), JobSource::Linkedin),
        entry(3, "Stripe", "Software Engineer, Payments", "Remote", 81, (160_000.0, 220_000.0), JobSource::AiGenerated),
        entry(4, "Shopify", "Full Stack Developer", "Remote", 76, (140_000.0, 190_000.0), JobSource::Manual),
    ]
}

pub fn interviews(now: DateTime<Utc>) -> Vec<Interview> {
    vec![
        Interview {
            id: 1,
            user_id: DEMO_USER_ID,
            company: "Google".to_string(),
            position: "Senior Software Engineer".to_string(),
            interview_date: days_ago(now, 5),
            status: "completed".to_string(),
            notes: Some("Two coding rounds, one system design".to_string()),
            created_at: days_ago(now, 12),
            updated_at: days_ago(now, 5),
        },
        Interview {
            id: 2,
            user_id: DEMO_USER_ID,
            company: "Stripe".to_string(),
            position: "Software Engineer, Payments".to_string(),
            interview_date: now + Duration::days(3),
            status: "scheduled".to_string(),
            notes: None,
            created_at: days_ago(now, 2),
            updated_at: days_ago(now, 2),
        },
    ]
}

pub fn mock_sessions(now: DateTime<Utc>) -> Vec<MockSession> {
    vec![MockSession {
        id: 1,
        user_id: DEMO_USER_ID,
        topic: "System Design".to_string(),
        difficulty: Difficulty::Medium,
        target_position: "Senior Software Engineer".to_string(),
        status: "completed".to_string(),
        score: Some(82.0),
        feedback: Some("Clear structure, go deeper on data partitioning".to_string()),
        created_at: days_ago(now, 4),
        updated_at: days_ago(now, 4),
    }]
}

pub fn mock_messages(now: DateTime<Utc>) -> Vec<MockMessage> {
    vec![
        MockMessage {
            id: 1,
            session_id: 1,
            role: MessageRole::Assistant,
            content: "How would you design a rate limiter for a public API?".to_string(),
            created_at: days_ago(now, 4),
        },
        MockMessage {
            id: 2,
            session_id: 1,
            role: MessageRole::User,
            content: "I would start with a token bucket per API key stored in Redis.".to_string(),
            created_at: days_ago(now, 4),
        },
    ]
}

pub fn assessment_reports(now: DateTime<Utc>) -> Vec<AssessmentReport> {
    vec![AssessmentReport {
        id: 1,
        user_id: DEMO_USER_ID,
        session_id: 1,
        overall_score: 82.0,
        technical_score: 85.0,
        communication_score: 80.0,
        problem_solving_score: 81.0,
        strengths: vec!["Structured approach".to_string(), "Clear trade-off discussion".to_string()],
        weaknesses: vec!["Shallow coverage of failure modes".to_string()],
        recommendations: vec!["Practice capacity estimation".to_string()],
        created_at: days_ago(now, 4),
    }]
}

pub fn knowledge_bases(now: DateTime<Utc>) -> Vec<KnowledgeBase> {
    vec![KnowledgeBase {
        id: 1,
        user_id: DEMO_USER_ID,
        name: "Google Interview Prep".to_string(),
        description: "Notes and past questions for Google interviews".to_string(),
        content: String::new(),
        created_at: days_ago(now, 20),
        updated_at: days_ago(now, 6),
    }]
}

pub fn job_tracker_items(now: DateTime<Utc>) -> Vec<JobTrackerItem> {
    vec![
        JobTrackerItem {
            id: 1,
            user_id: DEMO_USER_ID,
            company: "Meta".to_string(),
            position: "Backend Engineer".to_string(),
            status: "applied".to_string(),
            applied_date: days_ago(now, 8),
            notes: None,
            created_at: days_ago(now, 8),
            updated_at: days_ago(now, 8),
        },
        JobTrackerItem {
            id: 2,
            user_id: DEMO_USER_ID,
            company: "Google".to_string(),
            position: "Senior Software Engineer".to_string(),
            status: "interviewing".to_string(),
            applied_date: days_ago(now, 21),
            notes: Some("Onsite completed".to_string()),
            created_at: days_ago(now, 21),
            updated_at: days_ago(now, 5),
        },
    ]
}
