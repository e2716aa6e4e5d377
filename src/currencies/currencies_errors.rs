use thiserror::Error;

/// Local store failures. Foreign errors are flattened to strings so the
/// variants stay `Clone` for channel delivery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Connection error: {0}")]
    ConnectionFailed(String),

    #[error("Migration error: {0}")]
    MigrationFailed(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        StoreError::DatabaseError(err.to_string())
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(err: r2d2::Error) -> Self {
        StoreError::ConnectionFailed(err.to_string())
    }
}
