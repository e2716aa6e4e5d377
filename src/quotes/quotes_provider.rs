use async_trait::async_trait;

use crate::errors::Result;

use super::quotes_constants::{APILAYER_BASE_URL, APILAYER_FORMAT_TYPE, APILAYER_LIVE_ENDPOINT};
use super::quotes_errors::RemoteError;
use super::quotes_model::QuoteSnapshot;

/// Capability contract for the remote price-quote service. Implementations
/// perform a single request and propagate transport failures as-is; the
/// success flag inside the snapshot is for the caller to interpret.
#[async_trait]
pub trait RemoteQuoteClient: Send + Sync {
    async fn fetch_quotes(&self, pair_filter: &str) -> Result<QuoteSnapshot>;
}

/// apilayer/currencylayer "live" endpoint client. The access key and the
/// response-format selector are appended to every request.
pub struct ApiLayerQuoteClient {
    client: reqwest::Client,
    access_key: String,
    base_url: String,
}

impl ApiLayerQuoteClient {
    pub fn new(access_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_key,
            base_url: APILAYER_BASE_URL.to_string(),
        }
    }

    /// Overrides the endpoint base, mainly for tests against a local server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_url(&self, pair_filter: &str) -> String {
        format!(
            "{}/{}?access_key={}&currencies={}&format={}",
            self.base_url, APILAYER_LIVE_ENDPOINT, self.access_key, pair_filter, APILAYER_FORMAT_TYPE
        )
    }
}

#[async_trait]
impl RemoteQuoteClient for ApiLayerQuoteClient {
    async fn fetch_quotes(&self, pair_filter: &str) -> Result<QuoteSnapshot> {
        let url = self.request_url(pair_filter);

        let snapshot = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(RemoteError::from)?
            .json::<QuoteSnapshot>()
            .await
            .map_err(RemoteError::from)?;

        Ok(snapshot)
    }
}
