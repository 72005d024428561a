#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use quotescout_market_data::{
    HistoricalBar, HistoryPeriod, MarketDataError, MarketSummary, Quote, QuoteProvider,
    SearchType, StockService, StockServiceConfig, StockServiceTrait,
};
use quotescout_server::{api::app_router, config::Config, AppState};
use rust_decimal_macros::dec;
use tower::ServiceExt;

/// Serves a fixed set of quotes; `offline` makes every call an upstream failure.
pub struct FakeStockService {
    quotes: Vec<Quote>,
    offline: bool,
}

impl FakeStockService {
    pub fn new() -> Self {
        Self {
            quotes: vec![
                Quote::new("AAPL", Some("Apple Inc."), dec!(190), dec!(188), dec!(189))
                    .with_volume(Some(50_000_000)),
                Quote::new("MSFT", Some("Microsoft Corporation"), dec!(410), dec!(415), dec!(414))
                    .with_volume(Some(20_000_000)),
                Quote::new("IBM", Some("International Business Machines"), dec!(170), dec!(170), dec!(170)),
            ],
            offline: false,
        }
    }

    pub fn offline() -> Self {
        Self {
            quotes: Vec::new(),
            offline: true,
        }
    }

    fn check_online(&self) -> Result<(), MarketDataError> {
        if self.offline {
            Err(MarketDataError::ProviderUnavailable { attempted: 1 })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StockServiceTrait for FakeStockService {
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
        self.check_online()?;
        Ok(symbols
            .iter()
            .filter_map(|s| self.quotes.iter().find(|q| &q.symbol == s).cloned())
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Quote>, MarketDataError> {
        self.check_online()?;
        let needle = query.trim().to_uppercase();
        Ok(self
            .quotes
            .iter()
            .filter(|q| q.symbol.contains(&needle))
            .cloned()
            .collect())
    }

    async fn discover(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<Vec<Quote>, MarketDataError> {
        self.check_online()?;
        let needle = query.trim().to_uppercase();
        Ok(self
            .quotes
            .iter()
            .filter(|q| match search_type {
                SearchType::Symbol => q.symbol == needle,
                SearchType::Name => q.name.to_uppercase().contains(&needle),
                SearchType::All => {
                    q.symbol == needle || q.name.to_uppercase().contains(&needle)
                }
            })
            .cloned()
            .collect())
    }

    async fn market_summary(&self) -> Result<MarketSummary, MarketDataError> {
        self.check_online()?;
        Ok(MarketSummary::rank(&self.quotes))
    }

    async fn history(
        &self,
        symbol: &str,
        _period: HistoryPeriod,
    ) -> Result<Vec<HistoricalBar>, MarketDataError> {
        self.check_online()?;
        if symbol != "AAPL" {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(vec![HistoricalBar {
            date: Utc::now(),
            open: dec!(188),
            high: dec!(191),
            low: dec!(187),
            close: dec!(190),
            volume: 50_000_000,
        }])
    }
}

/// Quote provider that knows a fixed set of symbols.
pub struct ListedProvider {
    quotes: Vec<Quote>,
}

impl ListedProvider {
    pub fn new(symbols: &[&str]) -> Self {
        Self {
            quotes: symbols
                .iter()
                .map(|s| Quote::new(s, None, dec!(10), dec!(9), dec!(9)))
                .collect(),
        }
    }
}

#[async_trait]
impl QuoteProvider for ListedProvider {
    fn id(&self) -> &'static str {
        "LISTED"
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }
}

pub fn app(service: FakeStockService) -> Router {
    app_with_service(Arc::new(service))
}

/// Router over the real discovery pipeline backed by `provider`.
pub fn app_with_provider(provider: ListedProvider) -> Router {
    let service = StockService::new(Arc::new(provider), StockServiceConfig::default());
    app_with_service(Arc::new(service))
}

fn app_with_service(stock_service: Arc<dyn StockServiceTrait + Send + Sync>) -> Router {
    let state = Arc::new(AppState { stock_service });
    app_router(state, &Config::default())
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
