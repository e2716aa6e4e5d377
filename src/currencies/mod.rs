pub(crate) mod currencies_constants;
pub(crate) mod currencies_errors;
pub(crate) mod currencies_model;
pub(crate) mod currencies_repository;
pub(crate) mod currencies_traits;

// Re-export the public interface
pub use currencies_constants::SEED_CURRENCIES;
pub use currencies_errors::StoreError;
pub use currencies_model::{Currency, CurrencyEntity};
pub use currencies_repository::CurrencyRepository;
pub use currencies_traits::CurrencyStoreTrait;
