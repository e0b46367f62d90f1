use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::{self, redact_url};
use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let url = cfg.connection_url();
    let provider = providers::default_registry()?.provider_for_url(&url)?;
    info!(
        provider = provider.id().as_str(),
        url = %redact_url(&url),
        "connecting to database"
    );

    let db = provider.connect(cfg).await?;
    provider.post_connect(&db, cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry("todo_server::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}
