use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Authoritative copy of a resume in the relational store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: String,
    pub resume_text: String,
    /// Link to the mirror document, set once the mirror write and link patch succeed.
    pub mongo_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mirror copy of a resume as read back from the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MirrorRecord {
    /// 24-hex object id.
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub resume_text: String,
    /// Link back to the relational row.
    pub supabase_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
