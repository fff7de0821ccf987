//! Axum route handlers for the Resume API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{require_field, AppError};
use crate::models::resume::{MirrorRecord, ResumeRow};
use crate::resumes::id::ResumeId;
use crate::resumes::{DeletionSummary, SaveOutcome};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub user_id: Option<String>,
    pub resume_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveResumeResponse {
    pub success: bool,
    pub supabase_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<String>,
    pub already_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_id: Option<Uuid>,
    /// False when only the relational copy was written.
    pub mirrored: bool,
    pub linked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_error: Option<String>,
    pub message: String,
}

impl From<SaveOutcome> for SaveResumeResponse {
    fn from(outcome: SaveOutcome) -> Self {
        let supabase_id = outcome.primary_id();
        match outcome {
            SaveOutcome::AlreadyExists {
                primary_id,
                secondary_id,
            } => {
                // The existing row only carries a mirror id once the link patch landed.
                let mirrored = secondary_id.is_some();
                SaveResumeResponse {
                    success: true,
                    supabase_id,
                    mongo_id: secondary_id,
                    already_exists: true,
                    existing_id: Some(primary_id),
                    mirrored,
                    linked: mirrored,
                    mongo_error: None,
                    message: "Resume already exists".to_string(),
                }
            }
            SaveOutcome::Saved {
                secondary_id,
                linked,
                mirror_error,
                ..
            } => {
                let mirrored = secondary_id.is_some();
                SaveResumeResponse {
                    success: true,
                    supabase_id,
                    mongo_id: secondary_id,
                    already_exists: false,
                    existing_id: None,
                    mirrored,
                    linked,
                    mongo_error: mirror_error,
                    message: if mirrored {
                        "Resume saved successfully to both databases".to_string()
                    } else {
                        "Resume saved to the relational store (mirror failed)".to_string()
                    },
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResumeListResponse {
    pub success: bool,
    pub supabase_resumes: Vec<ResumeRow>,
    pub mongo_resumes: Vec<MirrorRecord>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResumeResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub summary: DeletionSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(req): Json<SaveResumeRequest>,
) -> Result<Json<SaveResumeResponse>, AppError> {
    let user_id = require_field(req.user_id, "user_id")?;
    let resume_text = require_field(req.resume_text, "resume_text")?;

    let outcome = state.resumes.save(&user_id, &resume_text).await?;
    Ok(Json(outcome.into()))
}

/// GET /api/v1/resumes?user_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let user_id = require_field(params.user_id, "user_id")?;

    let listing = state.resumes.fetch_all(&user_id).await?;
    Ok(Json(ResumeListResponse {
        success: true,
        supabase_resumes: listing.primary,
        mongo_resumes: listing.secondary,
        message: "Resumes fetched successfully".to_string(),
    }))
}

/// DELETE /api/v1/resumes/:id?user_id=
///
/// The id may be either store's identifier; its shape decides where the delete starts.
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DeleteResumeResponse>, AppError> {
    let user_id = require_field(params.user_id, "user_id")?;
    let resume_id = ResumeId::classify(id.trim());

    let summary = state.resumes.delete(&resume_id, &user_id).await?;
    Ok(Json(DeleteResumeResponse {
        success: true,
        message: summary.message().to_string(),
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_save_response_flags_missing_mirror() {
        let response: SaveResumeResponse = SaveOutcome::Saved {
            primary_id: Uuid::nil(),
            secondary_id: None,
            linked: false,
            mirror_error: Some("down".into()),
        }
        .into();

        assert!(response.success);
        assert!(!response.mirrored);
        assert_eq!(response.mongo_error.as_deref(), Some("down"));
    }

    #[test]
    fn test_existing_save_response() {
        let id = Uuid::new_v4();
        let response: SaveResumeResponse = SaveOutcome::AlreadyExists {
            primary_id: id,
            secondary_id: None,
        }
        .into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["already_exists"], true);
        assert_eq!(json["supabase_id"], id.to_string());
        assert_eq!(json["existing_id"], id.to_string());
        assert_eq!(json["mirrored"], false);
        assert!(json.get("mongo_id").is_none());
    }

    #[test]
    fn test_existing_mirrored_save_response_keeps_mirror_id() {
        let response: SaveResumeResponse = SaveOutcome::AlreadyExists {
            primary_id: Uuid::nil(),
            secondary_id: Some("65a1f0c20000000000000001".into()),
        }
        .into();

        assert!(response.already_exists);
        assert!(response.mirrored);
        assert!(response.linked);
        assert_eq!(response.mongo_id.as_deref(), Some("65a1f0c20000000000000001"));
    }
}
