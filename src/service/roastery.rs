//! Roastery CRUD. A roastery row is read together with its optional address and the
//! address's country through left joins.

use crate::error::AppError;
use crate::model::{Address, NewRoastery, Roastery};
use crate::service::address::{delete_address, upsert_address};
use crate::service::unit_of_work::UnitOfWork;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

#[async_trait]
pub trait RoasteryService: Send + Sync {
    async fn list(&self) -> Result<Vec<Roastery>, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<Roastery>, AppError>;
    async fn create(&self, input: &NewRoastery) -> Result<Roastery, AppError>;
    /// Full replace: optionals omitted from `input` are stored as null.
    async fn update(&self, input: &NewRoastery, id: Uuid) -> Result<Roastery, AppError>;
    /// Removes the roastery, its address, and (by cascade) its beans and their origins.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

const SELECT: &str = "SELECT r.external_id, r.name, r.description, r.address_id, \
    a.address1, a.address2, a.address3, a.city, a.postal_code, c.alpha2_code, \
    r.phone_number, r.website, r.facebook, r.instagram, r.twitter \
    FROM roastery r \
    LEFT JOIN address a ON a.id = r.address_id \
    LEFT JOIN country c ON c.id = a.country_id";

#[derive(sqlx::FromRow)]
struct RoasteryRow {
    external_id: Uuid,
    name: String,
    description: Option<String>,
    address_id: Option<i32>,
    address1: Option<String>,
    address2: Option<String>,
    address3: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    alpha2_code: Option<String>,
    phone_number: Option<String>,
    website: Option<String>,
    facebook: Option<String>,
    instagram: Option<String>,
    twitter: Option<String>,
}

impl From<RoasteryRow> for Roastery {
    fn from(row: RoasteryRow) -> Self {
        let address = match (row.address_id, row.address1, row.city, row.postal_code, row.alpha2_code) {
            (Some(_), Some(address1), Some(city), Some(postal_code), Some(country)) => Some(Address {
                address1,
                address2: row.address2,
                address3: row.address3,
                city,
                postal_code,
                country,
            }),
            _ => None,
        };
        Roastery {
            id: row.external_id,
            name: row.name,
            description: row.description,
            address,
            phone_number: row.phone_number,
            website: row.website,
            facebook: row.facebook,
            instagram: row.instagram,
            twitter: row.twitter,
        }
    }
}

#[derive(Clone)]
pub struct PgRoasteryService {
    pool: PgPool,
}

impl PgRoasteryService {
    pub fn new(pool: PgPool) -> Self {
        PgRoasteryService { pool }
    }

    async fn fetch_by_internal_id(conn: &mut PgConnection, id: i32) -> Result<Roastery, AppError> {
        let sql = format!("{} WHERE r.id = $1", SELECT);
        tracing::debug!(sql = %sql, id, "query");
        let row: RoasteryRow = sqlx::query_as(&sql).bind(id).fetch_one(&mut *conn).await?;
        Ok(row.into())
    }

    /// (internal id, address id) of the roastery with this external id.
    async fn locate(conn: &mut PgConnection, id: Uuid) -> Result<Option<(i32, Option<i32>)>, AppError> {
        const SQL: &str = "SELECT id, address_id FROM roastery WHERE external_id = $1";
        tracing::debug!(sql = SQL, %id, "query");
        let row = sqlx::query_as(SQL).bind(id).fetch_optional(&mut *conn).await?;
        Ok(row)
    }
}

#[async_trait]
impl RoasteryService for PgRoasteryService {
    async fn list(&self) -> Result<Vec<Roastery>, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let sql = format!("{} ORDER BY r.id", SELECT);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<RoasteryRow> = sqlx::query_as(&sql).fetch_all(uow.conn()).await?;
        uow.commit().await?;
        Ok(rows.into_iter().map(Roastery::from).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Roastery>, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let sql = format!("{} WHERE r.external_id = $1", SELECT);
        tracing::debug!(sql = %sql, %id, "query");
        let row: Option<RoasteryRow> = sqlx::query_as(&sql).bind(id).fetch_optional(uow.conn()).await?;
        uow.commit().await?;
        Ok(row.map(Roastery::from))
    }

    async fn create(&self, input: &NewRoastery) -> Result<Roastery, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let address_id = upsert_address(uow.conn(), None, input.address.as_ref()).await?;

        const SQL: &str = "INSERT INTO roastery (external_id, name, description, address_id, \
            phone_number, website, facebook, instagram, twitter) \
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id";
        let external_id = Uuid::new_v4();
        tracing::debug!(sql = SQL, %external_id, "query");
        let (id,): (i32,) = sqlx::query_as(SQL)
            .bind(external_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(address_id)
            .bind(&input.phone_number)
            .bind(&input.website)
            .bind(&input.facebook)
            .bind(&input.instagram)
            .bind(&input.twitter)
            .fetch_one(uow.conn())
            .await?;

        let created = Self::fetch_by_internal_id(uow.conn(), id).await?;
        uow.commit().await?;
        tracing::info!(roastery = %external_id, "roastery created");
        Ok(created)
    }

    async fn update(&self, input: &NewRoastery, id: Uuid) -> Result<Roastery, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let (internal_id, current_address) = Self::locate(uow.conn(), id)
            .await?
            .ok_or_else(|| AppError::not_found("roastery", id))?;

        let address_id = upsert_address(uow.conn(), current_address, input.address.as_ref()).await?;

        const SQL: &str = "UPDATE roastery SET name = $1, description = $2, address_id = $3, \
            phone_number = $4, website = $5, facebook = $6, instagram = $7, twitter = $8 \
            WHERE id = $9";
        tracing::debug!(sql = SQL, %id, "query");
        sqlx::query(SQL)
            .bind(&input.name)
            .bind(&input.description)
            .bind(address_id)
            .bind(&input.phone_number)
            .bind(&input.website)
            .bind(&input.facebook)
            .bind(&input.instagram)
            .bind(&input.twitter)
            .bind(internal_id)
            .execute(uow.conn())
            .await?;

        let updated = Self::fetch_by_internal_id(uow.conn(), internal_id).await?;
        uow.commit().await?;
        tracing::info!(roastery = %id, "roastery updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        const SQL: &str = "DELETE FROM roastery WHERE external_id = $1 RETURNING address_id";
        tracing::debug!(sql = SQL, %id, "query");
        let deleted: Option<(Option<i32>,)> = sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(uow.conn())
            .await?;
        let (address_id,) = deleted.ok_or_else(|| AppError::not_found("roastery", id))?;
        if let Some(address_id) = address_id {
            delete_address(uow.conn(), address_id).await?;
        }
        uow.commit().await?;
        tracing::info!(roastery = %id, "roastery deleted");
        Ok(())
    }
}
