//! Transaction scope for one service operation.

use crate::error::AppError;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

/// One database transaction spanning every read and write of a single operation.
///
/// Committed only by [`UnitOfWork::commit`]. Dropping it any other way (an early `?`
/// return included) rolls the transaction back, so a failing step never leaves
/// partial writes behind.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    pub async fn begin(pool: &PgPool) -> Result<Self, AppError> {
        let tx = pool.begin().await?;
        Ok(UnitOfWork { tx })
    }

    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }

    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}
