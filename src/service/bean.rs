//! Bean CRUD. Rows are joined to their roastery to surface its external id, and origins
//! come from the association table.

use crate::error::AppError;
use crate::model::{Bean, BeanComposition, BeanProcessing, DegreeOfRoasting, NewBean};
use crate::service::country::{origins_for, origins_for_many, replace_origins};
use crate::service::unit_of_work::UnitOfWork;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

#[async_trait]
pub trait BeanService: Send + Sync {
    async fn list(&self) -> Result<Vec<Bean>, AppError>;
    async fn get(&self, id: Uuid) -> Result<Option<Bean>, AppError>;
    /// Fails with `UnresolvedReference` when the roastery or an origin code does not exist.
    async fn create(&self, input: &NewBean) -> Result<Bean, AppError>;
    /// Create under the roastery named by a path, where a missing owner is `NotFound`
    /// rather than an unresolved reference. `input.roastery_id` is ignored.
    async fn create_for_roastery(&self, roastery_id: Uuid, input: &NewBean) -> Result<Bean, AppError>;
    /// Full replace of every field and of the origin set.
    async fn update(&self, input: &NewBean, id: Uuid) -> Result<Bean, AppError>;
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
    /// Fails with `NotFound` when the roastery does not exist.
    async fn list_for_roastery(&self, roastery_id: Uuid) -> Result<Vec<Bean>, AppError>;
}

const SELECT: &str = "SELECT b.id, b.external_id, b.name, r.external_id AS roastery_external_id, \
    b.altitude, b.degree_of_roasting, b.description, \
    b.is_washed, b.is_semi_washed, b.is_natural, \
    b.contains_arabica, b.contains_robusta, \
    b.arabica_fraction::float8 AS arabica_fraction, b.robusta_fraction::float8 AS robusta_fraction \
    FROM bean b \
    INNER JOIN roastery r ON r.id = b.roastery_id";

#[derive(sqlx::FromRow)]
struct BeanRow {
    id: i32,
    external_id: Uuid,
    name: String,
    roastery_external_id: Uuid,
    altitude: Option<String>,
    degree_of_roasting: Option<String>,
    description: Option<String>,
    is_washed: Option<bool>,
    is_semi_washed: Option<bool>,
    is_natural: Option<bool>,
    contains_arabica: Option<bool>,
    contains_robusta: Option<bool>,
    arabica_fraction: Option<f64>,
    robusta_fraction: Option<f64>,
}

impl BeanRow {
    fn into_bean(self, origins: Option<BTreeSet<String>>) -> Result<Bean, AppError> {
        let degree_of_roasting = self
            .degree_of_roasting
            .as_deref()
            .map(str::parse::<DegreeOfRoasting>)
            .transpose()
            .map_err(|e| AppError::Db(sqlx::Error::Decode(Box::new(e))))?;
        Ok(Bean {
            id: self.external_id,
            name: self.name,
            roastery_id: self.roastery_external_id,
            altitude: self.altitude,
            processing: BeanProcessing::from_columns(self.is_washed, self.is_semi_washed, self.is_natural),
            composition: BeanComposition::from_columns(
                self.contains_arabica,
                self.contains_robusta,
                self.arabica_fraction,
                self.robusta_fraction,
            ),
            origins,
            degree_of_roasting,
            description: self.description,
        })
    }
}

#[derive(Clone)]
pub struct PgBeanService {
    pool: PgPool,
}

impl PgBeanService {
    pub fn new(pool: PgPool) -> Self {
        PgBeanService { pool }
    }

    async fn fetch_by_internal_id(conn: &mut PgConnection, id: i32) -> Result<Bean, AppError> {
        let sql = format!("{} WHERE b.id = $1", SELECT);
        tracing::debug!(sql = %sql, id, "query");
        let row: BeanRow = sqlx::query_as(&sql).bind(id).fetch_one(&mut *conn).await?;
        let origins = origins_for(conn, id).await?;
        row.into_bean(origins)
    }

    /// Map rows to beans with one batched origin lookup.
    async fn hydrate(conn: &mut PgConnection, rows: Vec<BeanRow>) -> Result<Vec<Bean>, AppError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut origins: HashMap<i32, BTreeSet<String>> = origins_for_many(conn, &ids).await?;
        rows.into_iter()
            .map(|row| {
                let bean_origins = origins.remove(&row.id);
                row.into_bean(bean_origins)
            })
            .collect()
    }

    async fn roastery_internal_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<i32>, AppError> {
        const SQL: &str = "SELECT id FROM roastery WHERE external_id = $1";
        tracing::debug!(sql = SQL, roastery = %id, "query");
        let row: Option<(i32,)> = sqlx::query_as(SQL).bind(id).fetch_optional(&mut *conn).await?;
        Ok(row.map(|(id,)| id))
    }

    async fn bean_internal_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<i32>, AppError> {
        const SQL: &str = "SELECT id FROM bean WHERE external_id = $1";
        tracing::debug!(sql = SQL, bean = %id, "query");
        let row: Option<(i32,)> = sqlx::query_as(SQL).bind(id).fetch_optional(&mut *conn).await?;
        Ok(row.map(|(id,)| id))
    }

    /// Insert the bean row and its origins under an already resolved roastery.
    async fn insert(conn: &mut PgConnection, roastery_id: i32, input: &NewBean) -> Result<Bean, AppError> {
        const SQL: &str = "INSERT INTO bean (external_id, name, roastery_id, altitude, degree_of_roasting, \
            description, is_washed, is_semi_washed, is_natural, \
            contains_arabica, contains_robusta, arabica_fraction, robusta_fraction) \
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING id";
        let external_id = Uuid::new_v4();
        let processing = input.processing.as_ref();
        let composition = input.composition.as_ref();
        tracing::debug!(sql = SQL, bean = %external_id, "query");
        let (id,): (i32,) = sqlx::query_as(SQL)
            .bind(external_id)
            .bind(&input.name)
            .bind(roastery_id)
            .bind(&input.altitude)
            .bind(input.degree_of_roasting.map(DegreeOfRoasting::as_str))
            .bind(&input.description)
            .bind(processing.map(|p| p.is_washed))
            .bind(processing.map(|p| p.is_semi_washed))
            .bind(processing.map(|p| p.is_natural))
            .bind(composition.map(|c| c.contains_arabica))
            .bind(composition.map(|c| c.contains_robusta))
            .bind(composition.and_then(|c| c.arabica_fraction))
            .bind(composition.and_then(|c| c.robusta_fraction))
            .fetch_one(&mut *conn)
            .await?;

        replace_origins(conn, id, input.origin_codes()).await?;
        Self::fetch_by_internal_id(conn, id).await
    }
}

#[async_trait]
impl BeanService for PgBeanService {
    async fn list(&self) -> Result<Vec<Bean>, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let sql = format!("{} ORDER BY b.id", SELECT);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<BeanRow> = sqlx::query_as(&sql).fetch_all(uow.conn()).await?;
        let beans = Self::hydrate(uow.conn(), rows).await?;
        uow.commit().await?;
        Ok(beans)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Bean>, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let bean = match Self::bean_internal_id(uow.conn(), id).await? {
            Some(internal_id) => Some(Self::fetch_by_internal_id(uow.conn(), internal_id).await?),
            None => None,
        };
        uow.commit().await?;
        Ok(bean)
    }

    async fn create(&self, input: &NewBean) -> Result<Bean, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let roastery_id = Self::roastery_internal_id(uow.conn(), input.roastery_id)
            .await?
            .ok_or_else(|| AppError::unresolved("roastery", input.roastery_id))?;
        let created = Self::insert(uow.conn(), roastery_id, input).await?;
        uow.commit().await?;
        tracing::info!(bean = %created.id, roastery = %created.roastery_id, "bean created");
        Ok(created)
    }

    async fn create_for_roastery(&self, roastery_id: Uuid, input: &NewBean) -> Result<Bean, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let internal_id = Self::roastery_internal_id(uow.conn(), roastery_id)
            .await?
            .ok_or_else(|| AppError::not_found("roastery", roastery_id))?;
        let created = Self::insert(uow.conn(), internal_id, input).await?;
        uow.commit().await?;
        tracing::info!(bean = %created.id, roastery = %roastery_id, "bean created");
        Ok(created)
    }

    async fn update(&self, input: &NewBean, id: Uuid) -> Result<Bean, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let bean_id = Self::bean_internal_id(uow.conn(), id)
            .await?
            .ok_or_else(|| AppError::not_found("bean", id))?;
        let roastery_id = Self::roastery_internal_id(uow.conn(), input.roastery_id)
            .await?
            .ok_or_else(|| AppError::unresolved("roastery", input.roastery_id))?;

        const SQL: &str = "UPDATE bean SET name = $1, roastery_id = $2, altitude = $3, \
            degree_of_roasting = $4, description = $5, \
            is_washed = $6, is_semi_washed = $7, is_natural = $8, \
            contains_arabica = $9, contains_robusta = $10, \
            arabica_fraction = $11, robusta_fraction = $12 \
            WHERE id = $13";
        let processing = input.processing.as_ref();
        let composition = input.composition.as_ref();
        tracing::debug!(sql = SQL, bean = %id, "query");
        sqlx::query(SQL)
            .bind(&input.name)
            .bind(roastery_id)
            .bind(&input.altitude)
            .bind(input.degree_of_roasting.map(DegreeOfRoasting::as_str))
            .bind(&input.description)
            .bind(processing.map(|p| p.is_washed))
            .bind(processing.map(|p| p.is_semi_washed))
            .bind(processing.map(|p| p.is_natural))
            .bind(composition.map(|c| c.contains_arabica))
            .bind(composition.map(|c| c.contains_robusta))
            .bind(composition.and_then(|c| c.arabica_fraction))
            .bind(composition.and_then(|c| c.robusta_fraction))
            .bind(bean_id)
            .execute(uow.conn())
            .await?;

        replace_origins(uow.conn(), bean_id, input.origin_codes()).await?;

        let updated = Self::fetch_by_internal_id(uow.conn(), bean_id).await?;
        uow.commit().await?;
        tracing::info!(bean = %id, "bean updated");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        const SQL: &str = "DELETE FROM bean WHERE external_id = $1";
        tracing::debug!(sql = SQL, bean = %id, "query");
        let affected = sqlx::query(SQL).bind(id).execute(uow.conn()).await?.rows_affected();
        if affected == 0 {
            return Err(AppError::not_found("bean", id));
        }
        uow.commit().await?;
        tracing::info!(bean = %id, "bean deleted");
        Ok(())
    }

    async fn list_for_roastery(&self, roastery_id: Uuid) -> Result<Vec<Bean>, AppError> {
        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let internal_id = Self::roastery_internal_id(uow.conn(), roastery_id)
            .await?
            .ok_or_else(|| AppError::not_found("roastery", roastery_id))?;
        let sql = format!("{} WHERE b.roastery_id = $1 ORDER BY b.id", SELECT);
        tracing::debug!(sql = %sql, roastery = %roastery_id, "query");
        let rows: Vec<BeanRow> = sqlx::query_as(&sql).bind(internal_id).fetch_all(uow.conn()).await?;
        let beans = Self::hydrate(uow.conn(), rows).await?;
        uow.commit().await?;
        Ok(beans)
    }
}
