use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::runtime::Handle;

use crate::currencies::{Currency, CurrencyEntity, CurrencyStoreTrait};
use crate::errors::{Error, Result};
use crate::quotes::{ExchangeResult, RemoteError, RemoteQuoteClient};

use super::sync_errors::PopulationError;
use super::sync_subscriptions::{self, DisposalRegistry, Subscription, SubscriptionHandle};
use super::sync_traits::SyncRepositoryTrait;

/// Orchestrates cache population and the observable currency/quote queries.
/// Every pipeline it spawns leaves its handle in the shared disposal
/// registry so a controller can cancel all outstanding work uniformly.
pub struct SyncRepository {
    store: Arc<dyn CurrencyStoreTrait>,
    remote: Arc<dyn RemoteQuoteClient>,
    registry: Arc<DisposalRegistry>,
    worker: Option<Handle>,
    currency_list: Mutex<Option<Subscription<Vec<Currency>>>>,
}

impl SyncRepository {
    pub fn new(store: Arc<dyn CurrencyStoreTrait>, remote: Arc<dyn RemoteQuoteClient>) -> Self {
        Self {
            store,
            remote,
            registry: Arc::new(DisposalRegistry::default()),
            worker: None,
            currency_list: Mutex::new(None),
        }
    }

    /// Runs pipelines on the given runtime instead of the caller's. Results
    /// are still delivered on whichever context awaits the subscription.
    pub fn with_worker(mut self, worker: Handle) -> Self {
        self.worker = Some(worker);
        self
    }

    fn spawn_pipeline<T, F>(&self, fut: F) -> Subscription<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        // A torn-down session starts no new work.
        if self.registry.is_closed() {
            return sync_subscriptions::cancelled();
        }

        let (publisher, subscription, gate) = sync_subscriptions::channel();
        let task = async move {
            let result = fut.await;
            publisher.publish(result);
        };
        let handle = match &self.worker {
            Some(worker) => worker.spawn(task),
            None => tokio::spawn(task),
        };
        self.registry
            .register(SubscriptionHandle::new(handle.abort_handle(), gate));
        subscription
    }

    fn transform(entities: Vec<CurrencyEntity>) -> Vec<Currency> {
        entities.into_iter().map(Currency::from).collect()
    }
}

/// Runs a blocking store call off the async context.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(_) => Err(Error::Cancelled),
    }
}

impl SyncRepositoryTrait for SyncRepository {
    fn get_currency_list(&self) -> Subscription<Vec<Currency>> {
        let mut cached = self
            .currency_list
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(subscription) = cached.as_ref() {
            return subscription.clone();
        }

        let store = Arc::clone(&self.store);
        let subscription = self.spawn_pipeline(async move {
            let rows = run_blocking(move || store.list_all()).await?;
            Ok(Self::transform(rows))
        });

        *cached = Some(subscription.clone());
        subscription
    }

    fn get_available_exchange(&self, pair_spec: &str) -> Subscription<ExchangeResult> {
        let remote = Arc::clone(&self.remote);
        let pair_spec = pair_spec.to_string();
        self.spawn_pipeline(async move {
            let snapshot = remote.fetch_quotes(&pair_spec).await?;
            if snapshot.success {
                Ok(ExchangeResult::from(snapshot))
            } else {
                Err(RemoteError::RequestFailed(format!(
                    "no exchange data returned for {}",
                    pair_spec
                ))
                .into())
            }
        })
    }

    fn get_total_currencies(&self) -> Subscription<i64> {
        let store = Arc::clone(&self.store);
        self.spawn_pipeline(async move { run_blocking(move || store.count()).await })
    }

    fn add_currencies(&self) -> Result<()> {
        let seed = CurrencyEntity::seed_set();
        self.store
            .insert_all(&seed)
            .map_err(|e| PopulationError::SeedInsertFailed(e.to_string()).into())
    }

    fn registry(&self) -> Arc<DisposalRegistry> {
        Arc::clone(&self.registry)
    }
}
