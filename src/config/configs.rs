use anyhow::Result;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::db::providers::DbProviderId;

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

/// Connection settings for the todo store. A full `url` takes precedence
/// over the individual parts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub driver: DbProviderId,
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub min_idle: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            driver: DbProviderId::Postgres,
            host: defaults::DEFAULT_DB_HOST.to_string(),
            port: None,
            user: defaults::DEFAULT_DB_USER.to_string(),
            password: defaults::DEFAULT_DB_PASSWORD.to_string(),
            name: defaults::DEFAULT_DB_NAME.to_string(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS as u32,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE as u32,
        }
    }
}

// RFC 3986 unreserved characters stay literal in the userinfo part.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

impl DatabaseConfig {
    pub fn explicit_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(match self.driver {
            DbProviderId::MySql => defaults::DEFAULT_MYSQL_PORT as u16,
            DbProviderId::Postgres | DbProviderId::Sqlite => defaults::DEFAULT_POSTGRES_PORT as u16,
        })
    }

    pub fn connection_url(&self) -> String {
        if let Some(url) = self.explicit_url() {
            return url.to_string();
        }

        match self.driver {
            DbProviderId::Postgres | DbProviderId::MySql => format!(
                "{}://{}:{}@{}:{}/{}",
                self.driver.as_str(),
                utf8_percent_encode(&self.user, USERINFO),
                utf8_percent_encode(&self.password, USERINFO),
                self.host,
                self.port_or_default(),
                self.name
            ),
            DbProviderId::Sqlite => format!("sqlite://{}?mode=rwc", self.name),
        }
    }
}
