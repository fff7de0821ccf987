use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::blog::archive::BlogArchive;
use crate::inference::InferenceClient;
use crate::resumes::ResumeRepository;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every handle is built once in `main` and cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    /// Relational pool, used directly by the history queries.
    pub db: PgPool,
    pub resumes: ResumeRepository,
    pub blogs: Arc<dyn BlogArchive>,
    pub inference: InferenceClient,
    /// Plain HTTP client for fetching blog pages.
    pub http: Client,
}
