//! Country code resolution and the bean/country origin association.

use crate::error::AppError;
use sqlx::PgConnection;
use std::collections::{BTreeSet, HashMap};

/// Internal id of the country with the given alpha-2 code.
pub async fn resolve_country_id(conn: &mut PgConnection, code: &str) -> Result<i32, AppError> {
    const SQL: &str = "SELECT id FROM country WHERE alpha2_code = $1";
    tracing::debug!(sql = SQL, code, "query");
    let row: Option<(i32,)> = sqlx::query_as(SQL)
        .bind(code)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(|(id,)| id)
        .ok_or_else(|| AppError::unresolved("country", code))
}

/// Origin codes of one bean, or `None` when it has no association rows.
pub async fn origins_for(
    conn: &mut PgConnection,
    bean_id: i32,
) -> Result<Option<BTreeSet<String>>, AppError> {
    const SQL: &str = "SELECT c.alpha2_code FROM bean_origin bo \
        INNER JOIN country c ON c.id = bo.country_id \
        WHERE bo.bean_id = $1";
    tracing::debug!(sql = SQL, bean_id, "query");
    let rows: Vec<(String,)> = sqlx::query_as(SQL)
        .bind(bean_id)
        .fetch_all(&mut *conn)
        .await?;
    let origins: BTreeSet<String> = rows.into_iter().map(|(code,)| code).collect();
    Ok((!origins.is_empty()).then_some(origins))
}

/// Batch variant of [`origins_for`]: beans without origins are absent from the map.
pub async fn origins_for_many(
    conn: &mut PgConnection,
    bean_ids: &[i32],
) -> Result<HashMap<i32, BTreeSet<String>>, AppError> {
    if bean_ids.is_empty() {
        return Ok(HashMap::new());
    }
    const SQL: &str = "SELECT bo.bean_id, c.alpha2_code FROM bean_origin bo \
        INNER JOIN country c ON c.id = bo.country_id \
        WHERE bo.bean_id = ANY($1)";
    tracing::debug!(sql = SQL, beans = bean_ids.len(), "query");
    let rows: Vec<(i32, String)> = sqlx::query_as(SQL)
        .bind(bean_ids)
        .fetch_all(&mut *conn)
        .await?;
    let mut out: HashMap<i32, BTreeSet<String>> = HashMap::new();
    for (bean_id, code) in rows {
        out.entry(bean_id).or_default().insert(code);
    }
    Ok(out)
}

/// Replace the bean's origin rows with one row per code. An unresolvable code fails the
/// call; the enclosing transaction discards whatever was already deleted or inserted.
pub async fn replace_origins<'a, I>(
    conn: &mut PgConnection,
    bean_id: i32,
    codes: I,
) -> Result<(), AppError>
where
    I: IntoIterator<Item = &'a str>,
{
    const DELETE: &str = "DELETE FROM bean_origin WHERE bean_id = $1";
    tracing::debug!(sql = DELETE, bean_id, "query");
    sqlx::query(DELETE).bind(bean_id).execute(&mut *conn).await?;

    const INSERT: &str = "INSERT INTO bean_origin (bean_id, country_id) VALUES ($1, $2) \
        ON CONFLICT (bean_id, country_id) DO NOTHING";
    for code in codes {
        let country_id = resolve_country_id(conn, code).await?;
        tracing::debug!(sql = INSERT, bean_id, country_id, "query");
        sqlx::query(INSERT)
            .bind(bean_id)
            .bind(country_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
