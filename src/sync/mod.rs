pub(crate) mod sync_controller;
pub(crate) mod sync_errors;
pub(crate) mod sync_repository;
pub(crate) mod sync_subscriptions;
pub(crate) mod sync_traits;

#[cfg(test)]
mod sync_repository_tests;

// Re-export the public interface
pub use sync_controller::{PopulationState, PopulationStatus, SyncController};
pub use sync_errors::PopulationError;
pub use sync_repository::SyncRepository;
pub use sync_subscriptions::{DisposalRegistry, Subscription, SubscriptionHandle};
pub use sync_traits::SyncRepositoryTrait;
