use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::history::{HistoryEntry, HistoryRow, LinkedResume};
use crate::resumes::store::StoreError;

/// Parameters for recording one tailoring run.
pub struct NewHistory<'a> {
    pub user_id: &'a str,
    pub resume_id: Uuid,
    pub job_description: &'a str,
    pub tailored_resume: &'a Value,
}

/// Inserts a history row and returns it.
pub async fn insert_history(pool: &PgPool, new: NewHistory<'_>) -> Result<HistoryRow, StoreError> {
    let row = sqlx::query_as::<_, HistoryRow>(
        r#"
        INSERT INTO history (user_id, resume_id, job_description, tailored_resume, created_at)
        VALUES ($1, $2, $3, $4, now())
        RETURNING *
        "#,
    )
    .bind(new.user_id)
    .bind(new.resume_id)
    .bind(new.job_description)
    .bind(new.tailored_resume)
    .fetch_one(pool)
    .await?;

    info!("Recorded history {} for user {}", row.id, new.user_id);
    Ok(row)
}

#[derive(Debug, FromRow)]
struct HistoryJoinRow {
    id: Uuid,
    user_id: String,
    resume_id: Uuid,
    job_description: String,
    tailored_resume: Value,
    created_at: chrono::DateTime<chrono::Utc>,
    linked_id: Option<Uuid>,
    linked_text: Option<String>,
    linked_created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<HistoryJoinRow> for HistoryEntry {
    fn from(row: HistoryJoinRow) -> Self {
        let resumes = match (row.linked_id, row.linked_text, row.linked_created_at) {
            (Some(id), Some(resume_text), Some(created_at)) => Some(LinkedResume {
                id,
                resume_text,
                created_at,
            }),
            _ => None,
        };
        HistoryEntry {
            history: HistoryRow {
                id: row.id,
                user_id: row.user_id,
                resume_id: row.resume_id,
                job_description: row.job_description,
                tailored_resume: row.tailored_resume,
                created_at: row.created_at,
            },
            resumes,
        }
    }
}

/// Returns a user's history newest first, each entry joined with its resume if it still exists.
pub async fn list_history(pool: &PgPool, user_id: &str) -> Result<Vec<HistoryEntry>, StoreError> {
    let rows = sqlx::query_as::<_, HistoryJoinRow>(
        r#"
        SELECT h.id, h.user_id, h.resume_id, h.job_description, h.tailored_resume, h.created_at,
               r.id AS linked_id, r.resume_text AS linked_text, r.created_at AS linked_created_at
        FROM history h
        LEFT JOIN resumes r ON r.id = h.resume_id
        WHERE h.user_id = $1
        ORDER BY h.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(HistoryEntry::from).collect())
}
