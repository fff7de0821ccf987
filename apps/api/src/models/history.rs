use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoryRow {
    pub id: Uuid,
    pub user_id: String,
    pub resume_id: Uuid,
    pub job_description: String,
    pub tailored_resume: Value,
    pub created_at: DateTime<Utc>,
}

/// The subset of a resume row embedded in each history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedResume {
    pub id: Uuid,
    pub resume_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub history: HistoryRow,
    pub resumes: Option<LinkedResume>,
}
