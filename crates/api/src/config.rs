use std::str::FromStr;

use axum::http::HeaderValue;
use todo_core::listing::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Which [`todo_db::store::TodoStore`] implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process memory. Records are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

/// A configuration value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
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
    /// Persistence backend (default: PostgreSQL).
    pub store_backend: StoreBackend,
    /// Records per list page when the client does not ask (default: `10`).
    pub default_page_size: i64,
    /// Cap for a client-requested `page_size` (default: `100`).
    pub max_page_size: i64,
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
    /// | `TODO_STORE`           | `postgres`                 |
    /// | `DEFAULT_PAGE_SIZE`    | `10`                       |
    /// | `MAX_PAGE_SIZE`        | `100`                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let host = read("HOST", "0.0.0.0");
        let port: u16 = parse("PORT", read("PORT", "3000"), "a valid port number")?;

        let cors_origins: Vec<String> = read("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.parse::<HeaderValue>().is_err())
        {
            return Err(ConfigError::Invalid {
                name: "CORS_ORIGINS",
                expected: "a comma-separated list of origins",
                value: bad.clone(),
            });
        }

        let request_timeout_secs: u64 = parse(
            "REQUEST_TIMEOUT_SECS",
            read("REQUEST_TIMEOUT_SECS", "30"),
            "a whole number of seconds",
        )?;

        let raw_backend = read("TODO_STORE", "postgres");
        let store_backend = raw_backend
            .parse::<StoreBackend>()
            .map_err(|()| ConfigError::Invalid {
                name: "TODO_STORE",
                expected: "'postgres' or 'memory'",
                value: raw_backend.clone(),
            })?;

        let default_page_size = positive(
            "DEFAULT_PAGE_SIZE",
            read("DEFAULT_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string()),
        )?;
        let max_page_size = positive(
            "MAX_PAGE_SIZE",
            read("MAX_PAGE_SIZE", &MAX_PAGE_SIZE.to_string()),
        )?;
        if max_page_size < default_page_size {
            return Err(ConfigError::Invalid {
                name: "MAX_PAGE_SIZE",
                expected: "at least DEFAULT_PAGE_SIZE",
                value: max_page_size.to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store_backend,
            default_page_size,
            max_page_size,
        })
    }
}

fn parse<T: FromStr>(name: &'static str, value: String, expected: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}

fn positive(name: &'static str, value: String) -> Result<i64, ConfigError> {
    let expected = "a positive integer";
    let parsed: i64 = parse(name, value, expected)?;
    if parsed < 1 {
        return Err(ConfigError::Invalid {
            name,
            expected,
            value: parsed.to_string(),
        });
    }
    Ok(parsed)
}
