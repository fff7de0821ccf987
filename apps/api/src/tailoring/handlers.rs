//! Axum route handler for resume tailoring.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{require_field, AppError};
use crate::tailoring::tailor::{tailor_resume, ResumeData};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorRequest {
    pub resume_data: Option<ResumeData>,
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResponse {
    pub tailored_resume: ResumeData,
    pub success: bool,
    pub message: String,
}

/// POST /api/v1/tailor
pub async fn handle_tailor(Json(req): Json<TailorRequest>) -> Result<Json<TailorResponse>, AppError> {
    let resume = req
        .resume_data
        .ok_or_else(|| AppError::Validation("resumeData is required".to_string()))?;
    let job_description = require_field(req.job_description, "jobDescription")?;

    let tailored_resume = tailor_resume(&resume, &job_description);
    info!(
        "Tailored resume with {} technical skills",
        tailored_resume.content.skills.technical.len()
    );

    Ok(Json(TailorResponse {
        tailored_resume,
        success: true,
        message: "Resume tailored based on job requirements".to_string(),
    }))
}
