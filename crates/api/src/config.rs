use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// A configuration variable is missing or cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value: '{value}'")]
    Invalid { name: &'static str, value: String },

    #[error("{name} is not a valid connection URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error(
        "DB_ACQUIRE_TIMEOUT_SECS ({acquire}s) must be shorter than REQUEST_TIMEOUT_SECS ({request}s)"
    )]
    AcquireTimeoutTooLong { acquire: u64, request: u64 },
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }
}

/// Database connection settings.
///
/// `DATABASE_URL` wins when set. Otherwise the connection is described by
/// the `POSTGRES_*` variables used by the Docker setup. Those are passed to
/// [`PgConnectOptions`] field by field, so credentials need no escaping.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub connect_options: PgConnectOptions,
    /// Pool size (default: `20`).
    pub max_connections: u32,
    /// Longest wait for a pooled connection (default: `5`).
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// | Env Var                   | Default     |
    /// |---------------------------|-------------|
    /// | `DATABASE_URL`            | (unset)     |
    /// | `POSTGRES_HOST`           | `localhost` |
    /// | `POSTGRES_PORT`           | `5432`      |
    /// | `POSTGRES_USER`           | required    |
    /// | `POSTGRES_PASSWORD`       | empty       |
    /// | `POSTGRES_DB`             | required    |
    /// | `DB_MAX_CONNECTIONS`      | `20`        |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`         |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?;
        let acquire_timeout_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?;

        let connect_options = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| ConfigError::InvalidUrl {
                    name: "DATABASE_URL",
                    reason: e.to_string(),
                })?,
            None => {
                let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".into());
                let port: u16 = parse_or(&lookup, "POSTGRES_PORT", 5432)?;
                let user = lookup("POSTGRES_USER").ok_or(ConfigError::Missing {
                    name: "DATABASE_URL or POSTGRES_USER",
                })?;
                let database = lookup("POSTGRES_DB").ok_or(ConfigError::Missing {
                    name: "DATABASE_URL or POSTGRES_DB",
                })?;

                let options = PgConnectOptions::new_without_pgpass()
                    .host(&host)
                    .port(port)
                    .username(&user)
                    .database(&database);
                match lookup("POSTGRES_PASSWORD").filter(|p| !p.is_empty()) {
                    Some(password) => options.password(&password),
                    None => options,
                }
            }
        };

        Ok(Self {
            connect_options,
            max_connections,
            acquire_timeout_secs,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Reject an acquire timeout that the request timeout would cut short.
    pub fn check_against(&self, server: &ServerConfig) -> Result<(), ConfigError> {
        if self.acquire_timeout_secs >= server.request_timeout_secs {
            return Err(ConfigError::AcquireTimeoutTooLong {
                acquire: self.acquire_timeout_secs,
                request: server.request_timeout_secs,
            });
        }
        Ok(())
    }
}

// The connect options hold the password, so only the target is printed.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.connect_options.get_host())
            .field("port", &self.connect_options.get_port())
            .field("database", &self.connect_options.get_database())
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
