//! Dual-store resume repository.
//!
//! The relational store is authoritative. The document store is a mirror that
//! may lag or miss records: its failures are logged and reported, never fatal
//! once the relational write has committed. Nothing spans both stores
//! transactionally; a crash between the two halves of a delete leaves an orphan.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{MirrorRecord, ResumeRow};
use crate::resumes::id::ResumeId;
use crate::resumes::store::{DocumentStore, RelationalStore, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// An identical resume already exists for this owner; nothing was written.
    AlreadyExists {
        primary_id: Uuid,
        /// The mirror id already linked to the existing row, if any.
        secondary_id: Option<String>,
    },
    Saved {
        primary_id: Uuid,
        /// `None` when the mirror write failed.
        secondary_id: Option<String>,
        /// Whether the relational row now points at the mirror.
        linked: bool,
        mirror_error: Option<String>,
    },
}

impl SaveOutcome {
    pub fn primary_id(&self) -> Uuid {
        match self {
            SaveOutcome::AlreadyExists { primary_id, .. }
            | SaveOutcome::Saved { primary_id, .. } => *primary_id,
        }
    }
}

/// Both stores' views of one owner's resumes. No merging is done.
#[derive(Debug, Clone, Default)]
pub struct ResumeListing {
    pub primary: Vec<ResumeRow>,
    pub secondary: Vec<MirrorRecord>,
}

/// Per-store outcome of a delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeletionSummary {
    #[serde(rename = "deletedFromSupabase")]
    pub deleted_from_primary: bool,
    #[serde(rename = "deletedFromMongo")]
    pub deleted_from_secondary: bool,
    #[serde(rename = "supabaseError")]
    pub primary_error: Option<String>,
    #[serde(rename = "mongoError")]
    pub secondary_error: Option<String>,
}

impl DeletionSummary {
    pub fn deleted_anything(&self) -> bool {
        self.deleted_from_primary || self.deleted_from_secondary
    }

    pub fn message(&self) -> &'static str {
        match (self.deleted_from_primary, self.deleted_from_secondary) {
            (true, true) => "Resume deleted from both databases",
            (true, false) => "Resume deleted from the relational store",
            (false, true) => "Resume deleted from the document store",
            (false, false) => "Resume not found or could not be deleted",
        }
    }

    fn record_primary(&mut self, result: Result<bool, StoreError>) {
        match result {
            Ok(deleted) => self.deleted_from_primary = deleted,
            Err(e) => {
                warn!("Relational delete failed: {e}");
                self.primary_error = Some(e.to_string());
            }
        }
    }

    fn record_secondary(&mut self, result: Result<bool, StoreError>) {
        match result {
            Ok(deleted) => self.deleted_from_secondary = deleted,
            Err(e) => {
                warn!("Document store delete failed: {e}");
                self.secondary_error = Some(e.to_string());
            }
        }
    }
}

#[derive(Clone)]
pub struct ResumeRepository {
    relational: Arc<dyn RelationalStore>,
    documents: Arc<dyn DocumentStore>,
}

impl ResumeRepository {
    pub fn new(relational: Arc<dyn RelationalStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self {
            relational,
            documents,
        }
    }

    /// Saves a resume to the relational store, then mirrors it.
    ///
    /// Re-saving identical content for the same owner returns the existing id
    /// without writing. Relational errors abort; mirror and link errors only
    /// downgrade the outcome.
    pub async fn save(&self, owner_id: &str, content: &str) -> Result<SaveOutcome, StoreError> {
        if let Some(existing) = self.relational.find_by_content(owner_id, content).await? {
            info!("Resume {} already exists for user {owner_id}", existing.id);
            return Ok(SaveOutcome::AlreadyExists {
                primary_id: existing.id,
                secondary_id: existing.mongo_id,
            });
        }

        let row = match self.relational.insert(owner_id, content).await {
            Ok(row) => row,
            Err(StoreError::Duplicate(msg)) => {
                // A concurrent save won the unique index; report its row.
                let existing = self
                    .relational
                    .find_by_content(owner_id, content)
                    .await?
                    .ok_or(StoreError::Duplicate(msg))?;
                info!("Resume {} was inserted concurrently for user {owner_id}", existing.id);
                return Ok(SaveOutcome::AlreadyExists {
                    primary_id: existing.id,
                    secondary_id: existing.mongo_id,
                });
            }
            Err(e) => return Err(e),
        };
        info!("Inserted resume {} for user {owner_id}", row.id);

        let secondary_id = match self.documents.insert(owner_id, content, row.id).await {
            Ok(id) => id,
            Err(e) => {
                warn!("Resume {} saved without mirror: {e}", row.id);
                return Ok(SaveOutcome::Saved {
                    primary_id: row.id,
                    secondary_id: None,
                    linked: false,
                    mirror_error: Some(e.to_string()),
                });
            }
        };

        let linked = match self
            .relational
            .set_mirror_link(row.id, owner_id, &secondary_id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Failed to link resume {} to mirror {secondary_id}: {e}",
                    row.id
                );
                false
            }
        };

        Ok(SaveOutcome::Saved {
            primary_id: row.id,
            secondary_id: Some(secondary_id),
            linked,
            mirror_error: None,
        })
    }

    /// Lists an owner's resumes from both stores, newest first.
    /// A failing mirror yields an empty secondary list.
    pub async fn fetch_all(&self, owner_id: &str) -> Result<ResumeListing, StoreError> {
        let primary = self.relational.list_by_owner(owner_id).await?;

        let secondary = match self.documents.list_by_owner(owner_id).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Document store listing failed for user {owner_id}: {e}");
                Vec::new()
            }
        };

        Ok(ResumeListing { primary, secondary })
    }

    /// Deletes a resume and its linked copy in the other store.
    pub async fn delete(
        &self,
        id: &ResumeId,
        owner_id: &str,
    ) -> Result<DeletionSummary, AppError> {
        let mut summary = DeletionSummary::default();

        match id {
            ResumeId::Invalid(raw) => {
                return Err(AppError::InvalidIdentifier(format!(
                    "'{raw}' is neither an object id nor a UUID"
                )));
            }
            ResumeId::Secondary(secondary_id) => {
                self.delete_from_secondary(secondary_id, owner_id, &mut summary)
                    .await
            }
            ResumeId::Primary(primary_id) => {
                self.delete_from_primary(*primary_id, owner_id, &mut summary)
                    .await
            }
        }

        info!(
            "Delete summary for {:?}: relational={} document={}",
            id, summary.deleted_from_primary, summary.deleted_from_secondary
        );

        if summary.deleted_anything() {
            Ok(summary)
        } else {
            Err(AppError::ResumeNotFound(summary))
        }
    }

    async fn delete_from_secondary(
        &self,
        secondary_id: &str,
        owner_id: &str,
        summary: &mut DeletionSummary,
    ) {
        let record = match self.documents.find_by_id(secondary_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                info!("Mirror {secondary_id} not found");
                return;
            }
            Err(e) => {
                summary.record_secondary(Err(e));
                return;
            }
        };

        summary.record_secondary(self.documents.delete(secondary_id, owner_id).await);
        if !summary.deleted_from_secondary {
            return;
        }

        if let Some(link) = record.supabase_id.as_deref() {
            let result = match Uuid::parse_str(link) {
                Ok(primary_id) => self.relational.delete(primary_id, owner_id).await,
                Err(e) => Err(StoreError::InvalidLink(format!("{link}: {e}"))),
            };
            summary.record_primary(result);
        }
    }

    async fn delete_from_primary(
        &self,
        primary_id: Uuid,
        owner_id: &str,
        summary: &mut DeletionSummary,
    ) {
        let row = match self.relational.find_by_id(primary_id, owner_id).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                info!("Resume {primary_id} not found for user {owner_id}");
                return;
            }
            Err(e) => {
                summary.record_primary(Err(e));
                return;
            }
        };

        summary.record_primary(self.relational.delete(primary_id, owner_id).await);
        if !summary.deleted_from_primary {
            return;
        }

        if let Some(link) = row.mongo_id.as_deref() {
            summary.record_secondary(self.documents.delete(link, owner_id).await);
        }
    }
}
