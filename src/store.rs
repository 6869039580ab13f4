//! Database bootstrap: create the target database when the server starts against a fresh cluster.

use crate::error::{AppError, ConfigError};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use std::str::FromStr;

/// Maintenance database used to issue CREATE DATABASE.
const ADMIN_DATABASE: &str = "postgres";

/// Connect to the maintenance database and create the database named in
/// `database_url` if it is missing. No-op when the URL names no database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|_| ConfigError::InvalidSetting {
        key: "DATABASE_URL",
        value: database_url.to_string(),
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != ADMIN_DATABASE => name.to_string(),
        _ => return Ok(()),
    };

    let mut conn = opts.database(ADMIN_DATABASE).connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("holo\"cron"), "\"holo\"\"cron\"");
    }

    #[tokio::test]
    async fn malformed_url_is_a_config_error() {
        let err = ensure_database_exists("not a url").await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidSetting { key: "DATABASE_URL", .. })));
    }
}
