use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Archived blog post in the document store `blogs` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub url: String,
    pub title: String,
    pub main: String,
    /// Client-supplied publication date; defaults to the archive time (RFC 3339).
    pub date: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime,
}
