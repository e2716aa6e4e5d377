pub mod db;

pub mod currencies;
pub mod errors;
pub mod quotes;
pub mod schema;
pub mod sync;

pub use sync::{PopulationState, PopulationStatus, SyncController, SyncRepository};
