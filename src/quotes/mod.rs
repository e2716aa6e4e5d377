pub(crate) mod quotes_constants;
pub(crate) mod quotes_errors;
pub(crate) mod quotes_model;
pub(crate) mod quotes_provider;

// Re-export the public interface
pub use quotes_constants::*;
pub use quotes_errors::RemoteError;
pub use quotes_model::{ExchangeResult, QuoteSnapshot};
pub use quotes_provider::{ApiLayerQuoteClient, RemoteQuoteClient};
