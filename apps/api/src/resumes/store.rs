//! Store seams for the resume repository.
//!
//! `RelationalStore` is authoritative; `DocumentStore` holds a best-effort mirror.
//! Both are carried as `Arc<dyn _>` so tests can swap in in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{MirrorRecord, ResumeRow};

/// SQLSTATE `insufficient_privilege`, raised when a row-level security policy rejects a write.
const POLICY_VIOLATION: &str = "42501";
/// SQLSTATE `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("access denied by row-level policy: {0}")]
    PolicyDenied(String),

    #[error("duplicate record: {0}")]
    Duplicate(String),

    #[error("relational store error: {0}")]
    Relational(String),

    #[error("document store error: {0}")]
    Document(String),

    #[error("invalid cross-store link: {0}")]
    InvalidLink(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.code().as_deref() {
                Some(POLICY_VIOLATION) => return StoreError::PolicyDenied(db.message().to_string()),
                Some(UNIQUE_VIOLATION) => return StoreError::Duplicate(db.message().to_string()),
                _ => {}
            }
        }
        StoreError::Relational(e.to_string())
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Document(e.to_string())
    }
}

#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Exact `(owner, content)` match used for duplicate suppression.
    async fn find_by_content(
        &self,
        owner_id: &str,
        content: &str,
    ) -> Result<Option<ResumeRow>, StoreError>;

    async fn insert(&self, owner_id: &str, content: &str) -> Result<ResumeRow, StoreError>;

    /// Stores the mirror id on the row. Idempotent: repeating it with the same id is a no-op.
    async fn set_mirror_link(
        &self,
        id: Uuid,
        owner_id: &str,
        secondary_id: &str,
    ) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid, owner_id: &str) -> Result<Option<ResumeRow>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError>;

    /// Newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeRow>, StoreError>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts the mirror document carrying `primary_id` and returns its object id.
    async fn insert(
        &self,
        owner_id: &str,
        content: &str,
        primary_id: Uuid,
    ) -> Result<String, StoreError>;

    /// Lookup by id alone; ownership is enforced by `delete`.
    async fn find_by_id(&self, id: &str) -> Result<Option<MirrorRecord>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, id: &str, owner_id: &str) -> Result<bool, StoreError>;

    /// Newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<MirrorRecord>, StoreError>;
}
