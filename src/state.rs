//! Shared application state for all routes.

use crate::service::{BeanService, PgBeanService, PgRoasteryService, RoasteryService};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Used by the `/ready` route; services hold their own handle.
    pub pool: PgPool,
    pub roasteries: Arc<dyn RoasteryService>,
    pub beans: Arc<dyn BeanService>,
}

impl AppState {
    /// State backed by the Postgres services sharing `pool`.
    pub fn postgres(pool: PgPool) -> Self {
        AppState {
            roasteries: Arc::new(PgRoasteryService::new(pool.clone())),
            beans: Arc::new(PgBeanService::new(pool.clone())),
            pool,
        }
    }
}
