//! Axum route handlers for the History API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::{require_field, AppError};
use crate::history::store::{insert_history, list_history, NewHistory};
use crate::models::history::HistoryEntry;
use crate::resumes::handlers::UserIdQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveHistoryRequest {
    pub user_id: Option<String>,
    pub resume_id: Option<String>,
    pub job_description: Option<String>,
    pub tailored_resume: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SaveHistoryResponse {
    pub success: bool,
    pub history_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
    pub message: String,
}

/// POST /api/v1/history
pub async fn handle_save_history(
    State(state): State<AppState>,
    Json(req): Json<SaveHistoryRequest>,
) -> Result<Json<SaveHistoryResponse>, AppError> {
    let user_id = require_field(req.user_id, "user_id")?;
    let resume_id = require_field(req.resume_id, "resume_id")?;
    let job_description = require_field(req.job_description, "job_description")?;
    let tailored_resume = req
        .tailored_resume
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::Validation("tailored_resume is required".to_string()))?;

    let resume_id = Uuid::parse_str(resume_id.trim())
        .map_err(|_| AppError::Validation(format!("resume_id '{resume_id}' is not a UUID")))?;

    let row = insert_history(
        &state.db,
        NewHistory {
            user_id: &user_id,
            resume_id,
            job_description: &job_description,
            tailored_resume: &tailored_resume,
        },
    )
    .await?;

    Ok(Json(SaveHistoryResponse {
        success: true,
        history_id: row.id,
        message: "History saved successfully".to_string(),
    }))
}

/// GET /api/v1/history?user_id=
pub async fn handle_list_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<HistoryListResponse>, AppError> {
    let user_id = require_field(params.user_id, "user_id")?;

    let history = list_history(&state.db, &user_id).await?;
    Ok(Json(HistoryListResponse {
        success: true,
        history,
        message: "History fetched successfully".to_string(),
    }))
}
