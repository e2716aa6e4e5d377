use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::currencies::{CurrencyEntity, CurrencyStoreTrait, StoreError};
use crate::errors::{Error, Result};
use crate::quotes::{QuoteSnapshot, RemoteError, RemoteQuoteClient};
use crate::sync::sync_traits::SyncRepositoryTrait;
use crate::sync::SyncRepository;

#[derive(Default)]
struct MockCurrencyStore {
    rows: Mutex<Vec<CurrencyEntity>>,
    list_calls: AtomicUsize,
}

impl MockCurrencyStore {
    fn with_rows(rows: Vec<CurrencyEntity>) -> Self {
        Self {
            rows: Mutex::new(rows),
            list_calls: AtomicUsize::new(0),
        }
    }
}

impl CurrencyStoreTrait for MockCurrencyStore {
    fn count(&self) -> Result<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    fn list_all(&self) -> Result<Vec<CurrencyEntity>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.rows.lock().unwrap().clone())
    }

    fn insert_all(&self, records: &[CurrencyEntity]) -> Result<()> {
        self.rows.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}

struct MockQuoteClient {
    response: std::result::Result<QuoteSnapshot, RemoteError>,
    calls: AtomicUsize,
}

impl MockQuoteClient {
    fn returning(response: std::result::Result<QuoteSnapshot, RemoteError>) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RemoteQuoteClient for MockQuoteClient {
    async fn fetch_quotes(&self, _pair_filter: &str) -> Result<QuoteSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(Error::from)
    }
}

fn entity(code: &str, name: &str) -> CurrencyEntity {
    CurrencyEntity {
        country_code: code.to_string(),
        country_name: name.to_string(),
    }
}

fn success_snapshot(quotes: &[(&str, f64)]) -> QuoteSnapshot {
    QuoteSnapshot {
        success: true,
        source: Some("USD".to_string()),
        timestamp: Some(1_696_000_000),
        quotes: quotes
            .iter()
            .map(|(code, rate)| ((*code).to_string(), *rate))
            .collect(),
    }
}

fn repository_with(
    store: Arc<MockCurrencyStore>,
    remote: Arc<MockQuoteClient>,
) -> SyncRepository {
    SyncRepository::new(store, remote)
}

#[tokio::test]
async fn currency_list_is_pure_transform_of_store_rows() {
    let store = Arc::new(MockCurrencyStore::with_rows(vec![
        entity("US", "United States"),
        entity("CA", "Canada"),
        entity("MX", "Mexico"),
    ]));
    let remote = Arc::new(MockQuoteClient::returning(Ok(success_snapshot(&[]))));
    let repository = repository_with(store, remote);

    let list = repository.get_currency_list().recv().await.unwrap();

    assert_eq!(list.len(), 3);
    assert_eq!(
        list.iter()
            .map(|c| (c.country_code.as_str(), c.country_name.as_str()))
            .collect::<Vec<_>>(),
        vec![
            ("US", "United States"),
            ("CA", "Canada"),
            ("MX", "Mexico")
        ]
    );
}

#[tokio::test]
async fn currency_list_is_memoized_within_session() {
    let store = Arc::new(MockCurrencyStore::with_rows(vec![entity("US", "United States")]));
    let remote = Arc::new(MockQuoteClient::returning(Ok(success_snapshot(&[]))));
    let repository = repository_with(Arc::clone(&store), remote);

    let first = repository.get_currency_list().recv().await.unwrap();
    let second = repository.get_currency_list().recv().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
    // Only one pipeline handle was ever registered for the list.
    assert_eq!(repository.registry().len(), 1);
}

#[tokio::test]
async fn available_exchange_publishes_full_quote_mapping() {
    let store = Arc::new(MockCurrencyStore::default());
    let remote = Arc::new(MockQuoteClient::returning(Ok(success_snapshot(&[(
        "USDEUR", 0.9,
    )]))));
    let repository = repository_with(store, remote);

    let result = repository.get_available_exchange("EUR").recv().await.unwrap();

    assert_eq!(result.quotes, HashMap::from([("USDEUR".to_string(), 0.9)]));
}

#[tokio::test]
async fn available_exchange_fails_on_non_success_response() {
    let store = Arc::new(MockCurrencyStore::default());
    let remote = Arc::new(MockQuoteClient::returning(Ok(QuoteSnapshot {
        success: false,
        source: None,
        timestamp: None,
        quotes: HashMap::new(),
    })));
    let repository = repository_with(store, remote);

    let outcome = repository.get_available_exchange("EUR").recv().await;

    match outcome {
        Err(Error::Remote(RemoteError::RequestFailed(_))) => {}
        other => panic!("expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn available_exchange_propagates_transport_errors() {
    let store = Arc::new(MockCurrencyStore::default());
    let remote = Arc::new(MockQuoteClient::returning(Err(RemoteError::NetworkError(
        "connection refused".to_string(),
    ))));
    let repository = repository_with(store, remote);

    let outcome = repository.get_available_exchange("EUR").recv().await;

    assert_eq!(
        outcome,
        Err(Error::Remote(RemoteError::NetworkError(
            "connection refused".to_string()
        )))
    );
}

#[tokio::test]
async fn available_exchange_starts_a_fresh_pipeline_per_call() {
    let store = Arc::new(MockCurrencyStore::default());
    let remote = Arc::new(MockQuoteClient::returning(Ok(success_snapshot(&[(
        "USDEUR", 0.9,
    )]))));
    let repository = repository_with(store, Arc::clone(&remote));

    repository.get_available_exchange("EUR").recv().await.unwrap();
    repository.get_available_exchange("EUR").recv().await.unwrap();

    assert_eq!(remote.calls.load(Ordering::SeqCst), 2);
    assert_eq!(repository.registry().len(), 2);
}

#[tokio::test]
async fn total_currencies_forwards_store_count() {
    let store = Arc::new(MockCurrencyStore::with_rows(vec![
        entity("US", "United States"),
        entity("CA", "Canada"),
    ]));
    let remote = Arc::new(MockQuoteClient::returning(Ok(success_snapshot(&[]))));
    let repository = repository_with(store, remote);

    assert_eq!(repository.get_total_currencies().recv().await, Ok(2));
}

#[tokio::test]
async fn add_currencies_wraps_store_failures_as_population_errors() {
    struct FailingStore;
    impl CurrencyStoreTrait for FailingStore {
        fn count(&self) -> Result<i64> {
            Ok(0)
        }
        fn list_all(&self) -> Result<Vec<CurrencyEntity>> {
            Ok(Vec::new())
        }
        fn insert_all(&self, _records: &[CurrencyEntity]) -> Result<()> {
            Err(StoreError::DatabaseError("disk I/O error".to_string()).into())
        }
    }

    let remote = Arc::new(MockQuoteClient::returning(Ok(success_snapshot(&[]))));
    let repository = SyncRepository::new(Arc::new(FailingStore), remote);

    match repository.add_currencies() {
        Err(Error::Population(_)) => {}
        other => panic!("expected a population error, got {:?}", other),
    }
}
