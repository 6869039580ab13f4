//! Process settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server settings. Every field has a default suitable for local development.
///
/// | Env var                    | Default                          |
/// |----------------------------|----------------------------------|
/// | `HOST`                     | `0.0.0.0`                        |
/// | `PORT`                     | `8000`                           |
/// | `DATABASE_URL`             | `postgres://localhost/holocron`  |
/// | `DATABASE_MAX_CONNECTIONS` | `5`                              |
/// | `CORS_ORIGINS`             | `*`                              |
/// | `STAR_WARS_API_URL`        | `https://swapi.dev/api/`         |
/// | `UPSTREAM_TIMEOUT_SECS`    | `10`                             |
/// | `PROJECT_NAME`             | `Holocron API`                   |
/// | `LOG_FORMAT`               | `text`                           |
#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// `*` allows any origin.
    pub cors_origins: Vec<String>,
    pub star_wars_api_url: String,
    pub upstream_timeout_secs: u64,
    pub project_name: String,
    pub app_version: String,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Missing keys take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins = get("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match get("LOG_FORMAT", "text").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "text" => LogFormat::Text,
            other => {
                return Err(ConfigError::InvalidSetting {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Settings {
            host: get("HOST", "0.0.0.0"),
            port: parse_setting("PORT", get("PORT", "8000"))?,
            database_url: get("DATABASE_URL", "postgres://localhost/holocron"),
            database_max_connections: parse_setting(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS", "5"),
            )?,
            cors_origins,
            star_wars_api_url: get("STAR_WARS_API_URL", "https://swapi.dev/api/"),
            upstream_timeout_secs: parse_setting(
                "UPSTREAM_TIMEOUT_SECS",
                get("UPSTREAM_TIMEOUT_SECS", "10"),
            )?,
            project_name: get("PROJECT_NAME", "Holocron API"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_format,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_setting<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSetting { key, value })
}
