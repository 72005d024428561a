//! In-process quote provider for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::QuoteProvider;

#[derive(Default)]
pub(crate) struct FakeProvider {
    quotes: HashMap<String, Quote>,
    delays: HashMap<String, Duration>,
    broken: HashSet<String>,
    offline: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `symbol` at `price` against a previous close of `previous_close`.
    pub fn with_quote(self, symbol: &str, price: Decimal, previous_close: Decimal) -> Self {
        self.with_quote_and_volume(symbol, price, previous_close, None)
    }

    pub fn with_quote_and_volume(
        mut self,
        symbol: &str,
        price: Decimal,
        previous_close: Decimal,
        volume: Option<u64>,
    ) -> Self {
        let quote = Quote::new(symbol, None, price, previous_close, previous_close)
            .with_volume(volume);
        self.quotes.insert(symbol.to_uppercase(), quote);
        self
    }

    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_uppercase(), delay);
        self
    }

    /// Lookups for `symbol` fail with a provider (transport) error.
    pub fn with_broken(mut self, symbol: &str) -> Self {
        self.broken.insert(symbol.to_uppercase());
        self
    }

    /// Every lookup fails with a provider (transport) error.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteProvider for FakeProvider {
    fn id(&self) -> &'static str {
        "FAKE"
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let key = symbol.to_uppercase();
        self.calls.lock().unwrap().push(key.clone());

        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.offline || self.broken.contains(&key) {
            return Err(MarketDataError::ProviderError {
                provider: "FAKE".to_string(),
                message: "connection refused".to_string(),
            });
        }
        self.quotes
            .get(&key)
            .cloned()
            .ok_or(MarketDataError::SymbolNotFound(key))
    }
}
