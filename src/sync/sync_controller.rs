use std::sync::Arc;

use log::{error, info};
use tokio::sync::Mutex;

use crate::currencies::Currency;
use crate::quotes::ExchangeResult;

use super::sync_subscriptions::{DisposalRegistry, Subscription};
use super::sync_traits::SyncRepositoryTrait;

/// Population progress for one store instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationState {
    Unchecked,
    Checking,
    Populating,
    Populated,
    Failed,
}

/// Outcome of one `ensure_populated` call. Failures are logged before being
/// reported; they never propagate as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationStatus {
    AlreadyPopulated,
    Populated,
    Failed,
}

/// Mediates between a consumer and the sync repository: owns the
/// cache-population decision and tears down every outstanding pipeline when
/// the consumer goes away.
pub struct SyncController {
    repository: Arc<dyn SyncRepositoryTrait>,
    registry: Arc<DisposalRegistry>,
    population: Mutex<PopulationState>,
}

impl SyncController {
    pub fn new(repository: Arc<dyn SyncRepositoryTrait>) -> Self {
        Self {
            repository,
            registry: Arc::new(DisposalRegistry::default()),
            population: Mutex::new(PopulationState::Unchecked),
        }
    }

    /// Checks the store's record count and seeds it when empty. The state
    /// lock is held across the whole check-then-populate sequence, so
    /// concurrent callers cannot insert the seed set twice.
    pub async fn ensure_populated(&self) -> PopulationStatus {
        let mut state = self.population.lock().await;
        *state = PopulationState::Checking;

        let mut total = self.repository.get_total_currencies();
        let count = match total.recv().await {
            Ok(count) => count,
            Err(e) => {
                error!("Could not read the currency count: {}", e);
                *state = PopulationState::Failed;
                return PopulationStatus::Failed;
            }
        };

        if count > 0 {
            info!("Currency store has already been populated");
            *state = PopulationState::Populated;
            return PopulationStatus::AlreadyPopulated;
        }

        *state = PopulationState::Populating;
        let repository = Arc::clone(&self.repository);
        match tokio::task::spawn_blocking(move || repository.add_currencies()).await {
            Ok(Ok(())) => {
                info!("Currency store has been populated");
                *state = PopulationState::Populated;
                PopulationStatus::Populated
            }
            Ok(Err(e)) => {
                error!("Currency store has not been populated: {}", e);
                *state = PopulationState::Failed;
                PopulationStatus::Failed
            }
            Err(e) => {
                error!("Population task did not complete: {}", e);
                *state = PopulationState::Failed;
                PopulationStatus::Failed
            }
        }
    }

    pub async fn population_state(&self) -> PopulationState {
        *self.population.lock().await
    }

    pub fn currency_list(&self) -> Subscription<Vec<Currency>> {
        self.repository.get_currency_list()
    }

    pub fn available_exchange(&self, pair_spec: &str) -> Subscription<ExchangeResult> {
        self.repository.get_available_exchange(pair_spec)
    }

    pub fn total_currencies(&self) -> Subscription<i64> {
        self.repository.get_total_currencies()
    }

    /// Merges the repository's registry into the controller's own and
    /// disposes every handle. Safe to call repeatedly; after the first call
    /// both registries stay closed and late pipelines are cancelled at
    /// registration time.
    pub fn teardown(&self) {
        for handle in self.repository.registry().close_and_drain() {
            self.registry.register(handle);
        }
        for handle in self.registry.close_and_drain() {
            handle.dispose();
        }
    }
}
