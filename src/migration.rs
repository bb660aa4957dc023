//! Apply the relational schema and seed the country reference table.

use crate::countries::ALPHA2_CODES;
use crate::error::AppError;
use crate::schema;
use sqlx::PgPool;

/// Create all tables (idempotent) and insert any missing ISO 3166-1 alpha-2 codes,
/// in one transaction.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    for ddl in schema::STATEMENTS {
        tracing::debug!(sql = %ddl.trim(), "migration");
        sqlx::query(ddl).execute(&mut *tx).await?;
    }

    let seeded = sqlx::query(
        "INSERT INTO country (alpha2_code) SELECT unnest($1::text[]) ON CONFLICT (alpha2_code) DO NOTHING",
    )
    .bind(ALPHA2_CODES)
    .execute(&mut *tx)
    .await?
    .rows_affected();
    tx.commit().await?;

    tracing::info!(countries_seeded = seeded, "schema up to date");
    Ok(())
}
