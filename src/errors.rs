use thiserror::Error;

use crate::currencies::StoreError;
use crate::quotes::RemoteError;
use crate::sync::PopulationError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the synchronization core.
///
/// Values are delivered to consumers over watch channels, so every variant
/// must stay `Clone`; foreign errors are carried as strings by the module
/// error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Remote quote operation failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Population failed: {0}")]
    Population(#[from] PopulationError),

    /// The pipeline was disposed before it could publish a value.
    #[error("Subscription cancelled before a value was published")]
    Cancelled,
}
