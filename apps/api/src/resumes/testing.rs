//! In-memory store fakes for repository and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::resume::{MirrorRecord, ResumeRow};
use crate::resumes::store::{DocumentStore, RelationalStore, StoreError};

/// Which call a fake should fail.
#[derive(Debug, Clone, Default)]
pub struct Failures {
    pub insert: Option<StoreError>,
    pub link: Option<StoreError>,
    pub find: Option<StoreError>,
    pub delete: Option<StoreError>,
    pub list: Option<StoreError>,
}

#[derive(Default)]
pub struct FakeRelationalStore {
    pub rows: Mutex<Vec<ResumeRow>>,
    pub failures: Mutex<Failures>,
    pub calls: AtomicUsize,
    pub inserts: AtomicUsize,
}

impl FakeRelationalStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn row(&self, id: Uuid) -> Option<ResumeRow> {
        self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn fail_with(&self, set: impl FnOnce(&mut Failures)) {
        set(&mut self.failures.lock().unwrap());
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RelationalStore for FakeRelationalStore {
    async fn find_by_content(
        &self,
        owner_id: &str,
        content: &str,
    ) -> Result<Option<ResumeRow>, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().find.clone() {
            return Err(e);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == owner_id && r.resume_text == content)
            .cloned())
    }

    async fn insert(&self, owner_id: &str, content: &str) -> Result<ResumeRow, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().insert.clone() {
            return Err(e);
        }
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        // Each insert is a little newer than the last so ordering is observable.
        let now = Utc::now() + Duration::milliseconds(rows.len() as i64);
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: owner_id.to_string(),
            resume_text: content.to_string(),
            mongo_id: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn set_mirror_link(
        &self,
        id: Uuid,
        owner_id: &str,
        secondary_id: &str,
    ) -> Result<(), StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().link.clone() {
            return Err(e);
        }
        if let Some(row) = self
            .rows
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| r.id == id && r.user_id == owner_id)
        {
            row.mongo_id = Some(secondary_id.to_string());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid, owner_id: &str) -> Result<Option<ResumeRow>, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().find.clone() {
            return Err(e);
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id && r.user_id == owner_id)
            .cloned())
    }

    async fn delete(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().delete.clone() {
            return Err(e);
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.id == id && r.user_id == owner_id));
        Ok(rows.len() < before)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ResumeRow>, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().list.clone() {
            return Err(e);
        }
        let mut rows: Vec<ResumeRow> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[derive(Default)]
pub struct FakeDocumentStore {
    pub documents: Mutex<Vec<MirrorRecord>>,
    pub failures: Mutex<Failures>,
    pub calls: AtomicUsize,
    next_id: AtomicUsize,
}

impl FakeDocumentStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn document(&self, id: &str) -> Option<MirrorRecord> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn fail_with(&self, set: impl FnOnce(&mut Failures)) {
        set(&mut self.failures.lock().unwrap());
    }

    /// Seeds a mirror document directly, bypassing `insert`.
    pub fn seed(&self, owner_id: &str, content: &str, supabase_id: Option<Uuid>) -> String {
        let id = self.allocate_id();
        let now = Utc::now();
        self.documents.lock().unwrap().push(MirrorRecord {
            id: id.clone(),
            user_id: owner_id.to_string(),
            resume_text: content.to_string(),
            supabase_id: supabase_id.map(|u| u.to_string()),
            created_at: now,
            updated_at: now,
        });
        id
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("{:024x}", 0x65a1_f0c2_0000_0000_0000_0000u128 + n as u128)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn insert(
        &self,
        owner_id: &str,
        content: &str,
        primary_id: Uuid,
    ) -> Result<String, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().insert.clone() {
            return Err(e);
        }
        Ok(self.seed(owner_id, content, Some(primary_id)))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<MirrorRecord>, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().find.clone() {
            return Err(e);
        }
        Ok(self.document(id))
    }

    async fn delete(&self, id: &str, owner_id: &str) -> Result<bool, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().delete.clone() {
            return Err(e);
        }
        let mut documents = self.documents.lock().unwrap();
        let before = documents.len();
        documents.retain(|d| !(d.id == id && d.user_id == owner_id));
        Ok(documents.len() < before)
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<MirrorRecord>, StoreError> {
        self.touch();
        if let Some(e) = self.failures.lock().unwrap().list.clone() {
            return Err(e);
        }
        let mut documents: Vec<MirrorRecord> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == owner_id)
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }
}
