use crate::errors::Result;

use super::currencies_model::CurrencyEntity;

/// Capability contract for the durable currency table. All three verbs are
/// assumed crash-consistent; `insert_all` is atomic at the store layer.
pub trait CurrencyStoreTrait: Send + Sync {
    fn count(&self) -> Result<i64>;
    fn list_all(&self) -> Result<Vec<CurrencyEntity>>;
    fn insert_all(&self, records: &[CurrencyEntity]) -> Result<()>;
}
