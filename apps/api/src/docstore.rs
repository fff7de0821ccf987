use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::info;

/// Connects to MongoDB and returns a handle to the named database.
///
/// The driver connects lazily, so a ping is issued to fail fast on a bad URI
/// or unreachable cluster.
pub async fn connect(uri: &str, database: &str) -> Result<Database> {
    info!("Connecting to MongoDB...");

    let client = Client::with_uri_str(uri)
        .await
        .context("Invalid MONGODB_URI")?;
    let db = client.database(database);

    db.run_command(doc! { "ping": 1 }, None)
        .await
        .context("MongoDB ping failed")?;

    info!("MongoDB database '{database}' ready");
    Ok(db)
}
