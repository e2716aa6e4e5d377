use thiserror::Error;

/// Failure while inserting the seed set. Absorbed and logged at the
/// controller boundary; there is no subscriber-visible channel for the
/// background population trigger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PopulationError {
    #[error("Seed insert failed: {0}")]
    SeedInsertFailed(String),
}
