use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::ResumeRow;
use crate::resumes::store::{RelationalStore, StoreError};

/// `resumes` table in PostgreSQL.
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationalStore for PgResumeStore {
    async fn find_by_content(
        &self,
        owner_id: &str,
        content: &str,
    ) -> Result<Option<ResumeRow>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            SELECT * FROM resumes
            WHERE user_id = $1 AND resume_text = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert(&self, owner_id: &str, content: &str) -> Result<ResumeRow, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (user_id, resume_text, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn set_mirror_link(
        &self,
        id: Uuid,
        owner_id: &str,
        secondary_id: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE resumes
            SET mongo_id = $1, updated_at = now()
            WHERE id = $2 AND user_id = $3
              AND mongo_id IS DISTINCT FROM $1
            "#,
        )
        .bind(secondary_id)
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid, owner_id: &str) -> Result<Option<ResumeRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeRow>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
