use std::env;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

/// Placeholder secret used for local development only.
pub const DEFAULT_SECRET_KEY: &str = "change-me-in-production";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("DATABASE_URL is not a valid PostgreSQL URL: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Connection target, from `DATABASE_URL` or the individual `DB_*` parts.
    pub database: PgConnectOptions,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,

    pub secret_key: String,

    /// Number of records fed to the trend chart.
    pub chart_limit: u32,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// | Env Var              | Default                                   |
    /// |----------------------|-------------------------------------------|
    /// | `DATABASE_URL`       | unset; overrides the four `DB_*` parts    |
    /// | `DB_HOST`            | `localhost`                               |
    /// | `DB_USER`            | `postgres`                                |
    /// | `DB_PASSWORD`        | `postgres`                                |
    /// | `DB_NAME`            | `insomnia_cure`                           |
    /// | `DB_MAX_CONNECTIONS` | `5`                                       |
    /// | `SECRET_KEY`         | `change-me-in-production`                 |
    /// | `HOST`               | `0.0.0.0`                                 |
    /// | `PORT`               | `5000`                                    |
    /// | `CHART_LIMIT`        | `10`                                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        // Parts are passed as-is, so credentials need no URL escaping.
        let database = match lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            Some(url) => {
                PgConnectOptions::from_str(&url).map_err(ConfigError::InvalidDatabaseUrl)?
            }
            None => PgConnectOptions::new()
                .host(&var("DB_HOST", "localhost"))
                .username(&var("DB_USER", "postgres"))
                .password(&var("DB_PASSWORD", "postgres"))
                .database(&var("DB_NAME", "insomnia_cure")),
        };

        Ok(Self {
            database,
            db_max_connections: number("DB_MAX_CONNECTIONS", var("DB_MAX_CONNECTIONS", "5"))?,
            host: var("HOST", "0.0.0.0"),
            port: number("PORT", var("PORT", "5000"))?,
            secret_key: var("SECRET_KEY", DEFAULT_SECRET_KEY),
            chart_limit: number("CHART_LIMIT", var("CHART_LIMIT", "10"))?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn number<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { name, value })
}
