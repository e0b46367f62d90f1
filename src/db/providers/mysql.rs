use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId, connect_options};
use crate::config::DatabaseConfig;

const MYSQL_SCHEME: &str = "mysql://";
const MARIADB_SCHEME: &str = "mariadb://";

pub struct MySqlDbProvider;

#[async_trait]
impl DbProvider for MySqlDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::MySql
    }

    fn supports_url(&self, url: &str) -> bool {
        let normalized = url.trim().to_ascii_lowercase();
        normalized.starts_with(MYSQL_SCHEME) || normalized.starts_with(MARIADB_SCHEME)
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let url = mysql_url(&cfg.connection_url());
        let db = Database::connect(connect_options(url, cfg)).await?;
        Ok(db)
    }
}

// The driver only registers the mysql scheme; MariaDB speaks the same protocol.
fn mysql_url(url: &str) -> String {
    let trimmed = url.trim();
    match trimmed.get(..MARIADB_SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(MARIADB_SCHEME) => {
            format!("{MYSQL_SCHEME}{}", &trimmed[MARIADB_SCHEME.len()..])
        }
        _ => trimmed.to_string(),
    }
}
