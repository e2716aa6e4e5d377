use std::sync::Arc;

use crate::currencies::Currency;
use crate::errors::Result;
use crate::quotes::ExchangeResult;

use super::sync_subscriptions::{DisposalRegistry, Subscription};

/// Contract of the synchronization repository as seen by a controller.
pub trait SyncRepositoryTrait: Send + Sync {
    /// Observable currency list, memoized per session: repeated calls while
    /// a pipeline is already cached return the same handle.
    fn get_currency_list(&self) -> Subscription<Vec<Currency>>;

    /// Live exchange query; every call starts a fresh pipeline since rates
    /// are time-sensitive.
    fn get_available_exchange(&self, pair_spec: &str) -> Subscription<ExchangeResult>;

    /// Forwards the store's record count.
    fn get_total_currencies(&self) -> Subscription<i64>;

    /// Blocking seed insert; drive it off the primary execution context.
    fn add_currencies(&self) -> Result<()>;

    /// The registry every spawned pipeline registers its handle into.
    fn registry(&self) -> Arc<DisposalRegistry>;
}
