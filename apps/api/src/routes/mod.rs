pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::blog::handlers as blog;
use crate::history::handlers as history;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(resumes::handle_save_resume).get(resumes::handle_list_resumes),
        )
        .route("/api/v1/resumes/:id", delete(resumes::handle_delete_resume))
        .route("/api/v1/tailor", post(tailoring::handle_tailor))
        // History API
        .route(
            "/api/v1/history",
            post(history::handle_save_history).get(history::handle_list_history),
        )
        // Blog API
        .route("/api/v1/blog", post(blog::handle_save_blog))
        .route("/api/v1/blog/extract", post(blog::handle_extract))
        .route("/api/v1/blog/summarise", post(blog::handle_summarise))
        .route("/api/v1/blog/translate", post(blog::handle_translate))
        .with_state(state)
}
