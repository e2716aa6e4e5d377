use std::sync::Arc;

use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::currencies;

use super::currencies_errors::StoreError;
use super::currencies_model::CurrencyEntity;
use super::currencies_traits::CurrencyStoreTrait;

/// Diesel-backed implementation of the local currency store.
pub struct CurrencyRepository {
    pool: Arc<DbPool>,
}

impl CurrencyRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl CurrencyStoreTrait for CurrencyRepository {
    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        let total = currencies::table
            .count()
            .get_result::<i64>(&mut conn)
            .map_err(StoreError::from)?;

        Ok(total)
    }

    fn list_all(&self) -> Result<Vec<CurrencyEntity>> {
        let mut conn = get_connection(&self.pool)?;

        // No explicit ordering: rows come back in rowid order, which for this
        // append-only table is insertion order.
        let rows = currencies::table
            .load::<CurrencyEntity>(&mut conn)
            .map_err(StoreError::from)?;

        Ok(rows)
    }

    fn insert_all(&self, records: &[CurrencyEntity]) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        // Single transaction so a partial insert is never visible; existing
        // codes are skipped rather than duplicated.
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for record in records {
                diesel::insert_into(currencies::table)
                    .values(record)
                    .on_conflict(currencies::country_code)
                    .do_nothing()
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(StoreError::from)?;

        Ok(())
    }
}
