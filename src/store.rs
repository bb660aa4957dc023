//! Database bootstrap: create the target database if missing and open the shared pool.

use crate::config::Settings;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Connect to the `postgres` maintenance database and `CREATE DATABASE` when the one
/// named in `database_url` does not exist yet. A URL without a database path is left
/// to the server's default and nothing is created.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, target) = admin_options(database_url)?;
    let db_name = match target {
        Some(name) if name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Open the connection pool shared by every service.
pub async fn connect(settings: &Settings) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

/// Options for the `postgres` maintenance database on the same server, plus the
/// target database name when the URL carries one.
fn admin_options(url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(url)
        .map_err(|e| AppError::MalformedInput(format!("invalid DATABASE_URL: {}", e)))?;
    let target = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);
    Ok((opts.database("postgres"), target))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
