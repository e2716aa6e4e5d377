use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One point-in-time remote response: a success flag plus a mapping of quote
/// codes (concatenated base+target, e.g. `"USDEUR"`) to rates. Failure
/// responses carry `success = false` and no quotes.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct QuoteSnapshot {
    pub success: bool,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub quotes: HashMap<String, f64>,
}

impl QuoteSnapshot {
    /// Restricts the snapshot to the two requested currencies, keeping only
    /// keys that exactly match `"USD" + currency1` or `"USD" + currency2`.
    pub fn filter_pairs(&self, currency1: &str, currency2: &str) -> HashMap<String, f64> {
        let key1 = format!("USD{}", currency1);
        let key2 = format!("USD{}", currency2);

        self.quotes
            .iter()
            .filter(|(key, _)| *key == &key1 || *key == &key2)
            .map(|(key, rate)| (key.clone(), *rate))
            .collect()
    }
}

/// Domain-facing wrapper around the quote mapping requested by the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResult {
    pub quotes: HashMap<String, f64>,
}

impl From<QuoteSnapshot> for ExchangeResult {
    fn from(snapshot: QuoteSnapshot) -> Self {
        ExchangeResult {
            quotes: snapshot.quotes,
        }
    }
}
