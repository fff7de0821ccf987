//! Axum route handlers for the Blog API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::blog::archive::NewBlog;
use crate::blog::extract::{fetch_and_extract, ExtractedPage};
use crate::errors::{require_field, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummariseRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummariseResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub urdu: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveBlogRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub main: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBlogResponse {
    pub success: bool,
    pub inserted_id: String,
}

/// POST /api/v1/blog/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractedPage>, AppError> {
    let url = require_field(req.url, "url")?;

    let page = fetch_and_extract(&state.http, url.trim())
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to fetch or parse blog: {e}")))?;
    Ok(Json(page))
}

/// POST /api/v1/blog/summarise
pub async fn handle_summarise(
    State(state): State<AppState>,
    Json(req): Json<SummariseRequest>,
) -> Result<Json<SummariseResponse>, AppError> {
    let content = require_field(req.content, "content")?;

    let summary = state
        .inference
        .summarise(&content)
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to summarise: {e}")))?;
    Ok(Json(SummariseResponse { summary }))
}

/// POST /api/v1/blog/translate
pub async fn handle_translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    let text = require_field(req.text, "text")?;

    let urdu = state
        .inference
        .translate(&text)
        .await
        .map_err(|e| AppError::Upstream(format!("Failed to translate: {e}")))?;
    Ok(Json(TranslateResponse { urdu }))
}

/// POST /api/v1/blog
pub async fn handle_save_blog(
    State(state): State<AppState>,
    Json(req): Json<SaveBlogRequest>,
) -> Result<Json<SaveBlogResponse>, AppError> {
    let blog = NewBlog {
        url: require_field(req.url, "url")?,
        title: require_field(req.title, "title")?,
        main: require_field(req.main, "main")?,
        date: req.date.filter(|d| !d.trim().is_empty()),
    };

    let inserted_id = state.blogs.save(blog).await?;
    Ok(Json(SaveBlogResponse {
        success: true,
        inserted_id,
    }))
}
