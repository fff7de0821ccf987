//! Resume identifiers arrive as bare strings; the shape of the string decides
//! which store owns the record. Classification happens once, at the API boundary.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

static OBJECT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("object id pattern is valid"));

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeId {
    /// Relational row id.
    Primary(Uuid),
    /// Document store object id, 24 hex characters.
    Secondary(String),
    /// Neither shape; never reaches a store.
    Invalid(String),
}

impl ResumeId {
    pub fn classify(raw: &str) -> Self {
        if OBJECT_ID_RE.is_match(raw) {
            return ResumeId::Secondary(raw.to_string());
        }
        if UUID_RE.is_match(raw) {
            if let Ok(id) = Uuid::parse_str(raw) {
                return ResumeId::Primary(id);
            }
        }
        ResumeId::Invalid(raw.to_string())
    }
}
