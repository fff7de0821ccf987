mod blog;
mod config;
mod db;
mod docstore;
mod errors;
mod history;
mod inference;
mod models;
mod resumes;
mod routes;
mod state;
mod tailoring;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::blog::archive::MongoBlogArchive;
use crate::config::Config;
use crate::db::create_pool;
use crate::inference::InferenceClient;
use crate::resumes::mongo::MongoResumeStore;
use crate::resumes::postgres::PgResumeStore;
use crate::resumes::ResumeRepository;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Relational store (authoritative)
    let db = create_pool(&config.database_url).await?;

    // Document store (mirror + blog archive)
    let mongo = docstore::connect(&config.mongodb_uri, &config.mongodb_database).await?;

    let resumes = ResumeRepository::new(
        Arc::new(PgResumeStore::new(db.clone())),
        Arc::new(MongoResumeStore::new(&mongo)),
    );

    let inference = InferenceClient::new(
        config.inference_base_url.clone(),
        config.huggingface_api_token.clone(),
    )?;
    info!(
        "Inference client initialized ({}, token: {})",
        config.inference_base_url,
        if config.huggingface_api_token.is_some() { "set" } else { "none" }
    );

    let state = AppState {
        db: db.clone(),
        resumes,
        blogs: Arc::new(MongoBlogArchive::new(&mongo)),
        inference,
        http: reqwest::Client::new(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down, closing PostgreSQL pool");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
