use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::DateTime;
use mongodb::{Collection, Database};

use crate::models::blog::BlogDocument;
use crate::resumes::store::StoreError;

pub const BLOGS_COLLECTION: &str = "blogs";

pub struct NewBlog {
    pub url: String,
    pub title: String,
    pub main: String,
    pub date: Option<String>,
}

impl NewBlog {
    fn into_document(self) -> BlogDocument {
        BlogDocument {
            id: None,
            url: self.url,
            title: self.title,
            main: self.main,
            date: self.date.unwrap_or_else(|| Utc::now().to_rfc3339()),
            created_at: DateTime::now(),
        }
    }
}

/// Archive of extracted blog posts.
#[async_trait]
pub trait BlogArchive: Send + Sync {
    /// Returns the inserted document's id.
    async fn save(&self, blog: NewBlog) -> Result<String, StoreError>;
}

#[derive(Clone)]
pub struct MongoBlogArchive {
    collection: Collection<BlogDocument>,
}

impl MongoBlogArchive {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(BLOGS_COLLECTION),
        }
    }
}

#[async_trait]
impl BlogArchive for MongoBlogArchive {
    async fn save(&self, blog: NewBlog) -> Result<String, StoreError> {
        let result = self
            .collection
            .insert_one(blog.into_document(), None)
            .await?;
        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| StoreError::Document("insert did not return an ObjectId".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_defaults_to_now() {
        let document = NewBlog {
            url: "https://example.com/post".into(),
            title: "Post".into(),
            main: "Body".into(),
            date: None,
        }
        .into_document();
        assert!(chrono::DateTime::parse_from_rfc3339(&document.date).is_ok());
    }

    #[test]
    fn test_client_date_is_kept() {
        let document = NewBlog {
            url: "https://example.com/post".into(),
            title: "Post".into(),
            main: "Body".into(),
            date: Some("2024-01-01".into()),
        }
        .into_document();
        assert_eq!(document.date, "2024-01-01");
    }
}
