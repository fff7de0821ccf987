use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::models::resume::MirrorRecord;
use crate::resumes::store::{DocumentStore, StoreError};

pub const RESUMES_COLLECTION: &str = "resumes";

/// On-disk shape of a mirror document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResumeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    user_id: String,
    resume_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supabase_id: Option<String>,
    created_at: BsonDateTime,
    /// Older mirror documents were written without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<BsonDateTime>,
}

impl ResumeDocument {
    fn into_record(self) -> Option<MirrorRecord> {
        Some(MirrorRecord {
            id: self.id?.to_hex(),
            user_id: self.user_id,
            resume_text: self.resume_text,
            supabase_id: self.supabase_id,
            created_at: to_chrono(self.created_at),
            updated_at: to_chrono(self.updated_at.unwrap_or(self.created_at)),
        })
    }
}

fn to_chrono(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

/// Decodes one listed document, skipping any whose shape no longer matches.
fn decode_listed(raw: Document) -> Option<MirrorRecord> {
    match bson::from_document::<ResumeDocument>(raw) {
        Ok(document) => document.into_record(),
        Err(e) => {
            warn!("Skipping undecodable mirror document: {e}");
            None
        }
    }
}

fn parse_object_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|e| StoreError::InvalidLink(format!("{id}: {e}")))
}

/// `resumes` collection in MongoDB.
#[derive(Clone)]
pub struct MongoResumeStore {
    collection: Collection<ResumeDocument>,
}

impl MongoResumeStore {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(RESUMES_COLLECTION),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoResumeStore {
    async fn insert(
        &self,
        owner_id: &str,
        content: &str,
        primary_id: Uuid,
    ) -> Result<String, StoreError> {
        let now = BsonDateTime::now();
        let document = ResumeDocument {
            id: None,
            user_id: owner_id.to_string(),
            resume_text: content.to_string(),
            supabase_id: Some(primary_id.to_string()),
            created_at: now,
            updated_at: Some(now),
        };

        let result = self.collection.insert_one(document, None).await?;
        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| StoreError::Document("insert did not return an ObjectId".to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MirrorRecord>, StoreError> {
        let oid = parse_object_id(id)?;
        let found = self.collection.find_one(doc! { "_id": oid }, None).await?;
        Ok(found.and_then(ResumeDocument::into_record))
    }

    async fn delete(&self, id: &str, owner_id: &str) -> Result<bool, StoreError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": oid, "user_id": owner_id }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<MirrorRecord>, StoreError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();
        let cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(doc! { "user_id": owner_id }, options)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents.into_iter().filter_map(decode_listed).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_record_uses_hex_id() {
        let oid = ObjectId::new();
        let document = ResumeDocument {
            id: Some(oid),
            user_id: "u1".to_string(),
            resume_text: "R1".to_string(),
            supabase_id: None,
            created_at: BsonDateTime::from_millis(1_700_000_000_000),
            updated_at: Some(BsonDateTime::from_millis(1_700_000_000_000)),
        };
        let record = document.into_record().unwrap();
        assert_eq!(record.id, oid.to_hex());
        assert_eq!(record.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_listed_document_without_updated_at_falls_back_to_created_at() {
        let oid = ObjectId::new();
        let raw = doc! {
            "_id": oid,
            "user_id": "u1",
            "resume_text": "R1",
            "created_at": BsonDateTime::from_millis(1_700_000_000_000),
        };

        let record = decode_listed(raw).unwrap();

        assert_eq!(record.id, oid.to_hex());
        assert!(record.supabase_id.is_none());
        assert_eq!(record.updated_at, record.created_at);
    }

    #[test]
    fn test_listed_document_with_foreign_shape_is_skipped() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "user_id": "u1",
            "resume_text": "R1",
            "created_at": "2024-01-15T10:00:00Z",
        };
        assert!(decode_listed(raw).is_none());
    }

    #[test]
    fn test_parse_object_id_rejects_malformed_link() {
        assert!(matches!(
            parse_object_id("zzz"),
            Err(StoreError::InvalidLink(_))
        ));
    }
}
