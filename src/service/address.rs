//! Lifecycle of the optional address row owned by a roastery.

use crate::error::AppError;
use crate::model::Address;
use crate::service::country::resolve_country_id;
use sqlx::PgConnection;

/// Bring the owner's address row in line with `address`.
///
/// | existing | new     | effect                       | returns     |
/// |----------|---------|------------------------------|-------------|
/// | none     | none    | nothing                      | `None`      |
/// | none     | some    | insert (country resolved)    | new id      |
/// | some     | none    | delete                       | `None`      |
/// | some     | some    | update in place              | existing id |
pub async fn upsert_address(
    conn: &mut PgConnection,
    existing: Option<i32>,
    address: Option<&Address>,
) -> Result<Option<i32>, AppError> {
    match (existing, address) {
        (None, None) => Ok(None),
        (None, Some(address)) => {
            let country_id = resolve_country_id(conn, &address.country).await?;
            const SQL: &str = "INSERT INTO address (address1, address2, address3, city, postal_code, country_id) \
                VALUES ($1, $2, $3, $4, $5, $6) RETURNING id";
            tracing::debug!(sql = SQL, "query");
            let (id,): (i32,) = sqlx::query_as(SQL)
                .bind(&address.address1)
                .bind(&address.address2)
                .bind(&address.address3)
                .bind(&address.city)
                .bind(&address.postal_code)
                .bind(country_id)
                .fetch_one(&mut *conn)
                .await?;
            Ok(Some(id))
        }
        (Some(id), None) => {
            delete_address(conn, id).await?;
            Ok(None)
        }
        (Some(id), Some(address)) => {
            let country_id = resolve_country_id(conn, &address.country).await?;
            const SQL: &str = "UPDATE address SET address1 = $1, address2 = $2, address3 = $3, \
                city = $4, postal_code = $5, country_id = $6 WHERE id = $7";
            tracing::debug!(sql = SQL, address_id = id, "query");
            sqlx::query(SQL)
                .bind(&address.address1)
                .bind(&address.address2)
                .bind(&address.address3)
                .bind(&address.city)
                .bind(&address.postal_code)
                .bind(country_id)
                .bind(id)
                .execute(&mut *conn)
                .await?;
            Ok(Some(id))
        }
    }
}

/// The referencing `roastery.address_id` is set null by the foreign key.
pub async fn delete_address(conn: &mut PgConnection, id: i32) -> Result<(), AppError> {
    const SQL: &str = "DELETE FROM address WHERE id = $1";
    tracing::debug!(sql = SQL, address_id = id, "query");
    sqlx::query(SQL).bind(id).execute(&mut *conn).await?;
    Ok(())
}
