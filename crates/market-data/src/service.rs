//! Stock service: the operations exposed over HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::constants::{
    DEFAULT_PROVIDER_TIMEOUT, DEFAULT_UNIVERSE, SEARCH_RESULT_LIMIT, SEED_FALLBACK_LIMIT,
};
use crate::discovery::{shape, union, CandidateGenerator, MarketSummaryAggregator, QuoteResolver};
use crate::errors::MarketDataError;
use crate::models::{HistoricalBar, HistoryPeriod, MarketSummary, Quote, SearchType};
use crate::provider::QuoteProvider;

/// Immutable startup configuration for [`StockService`].
#[derive(Clone, Debug)]
pub struct StockServiceConfig {
    /// Symbols ranked by the market summary
    pub universe: Vec<String>,
    /// Symbols searched by substring when no candidate resolves
    pub seed_symbols: Vec<String>,
    /// Result cap for search and discovery
    pub search_limit: usize,
    /// Per-lookup provider timeout
    pub provider_timeout: Duration,
}

impl Default for StockServiceConfig {
    fn default() -> Self {
        let defaults: Vec<String> = DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect();
        Self {
            universe: defaults.clone(),
            seed_symbols: defaults,
            search_limit: SEARCH_RESULT_LIMIT,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

#[async_trait]
pub trait StockServiceTrait: Send + Sync {
    /// Quotes for explicit symbols, deduplicated, in request order.
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError>;

    /// Symbol-pipeline search with the seed-list fallback.
    async fn search(&self, query: &str) -> Result<Vec<Quote>, MarketDataError>;

    async fn discover(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<Vec<Quote>, MarketDataError>;

    async fn market_summary(&self) -> Result<MarketSummary, MarketDataError>;

    async fn history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<Vec<HistoricalBar>, MarketDataError>;
}

pub struct StockService {
    generator: CandidateGenerator,
    resolver: Arc<QuoteResolver>,
    aggregator: MarketSummaryAggregator,
    universe: Vec<String>,
    seed_symbols: Vec<String>,
    search_limit: usize,
}

impl StockService {
    pub fn new(provider: Arc<dyn QuoteProvider>, config: StockServiceConfig) -> Self {
        let resolver = Arc::new(QuoteResolver::new(provider, config.provider_timeout));
        Self {
            generator: CandidateGenerator::default(),
            aggregator: MarketSummaryAggregator::new(resolver.clone()),
            resolver,
            universe: config.universe,
            seed_symbols: config.seed_symbols,
            search_limit: config.search_limit,
        }
    }

    /// Replace the candidate generator (e.g. to change exchange suffixes).
    pub fn with_generator(mut self, generator: CandidateGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Every strategy, then the seed list if nothing resolved.
    async fn symbol_pipeline(&self, query: &str) -> Result<Vec<Quote>, MarketDataError> {
        let candidates = self.generator.generate(query);
        debug!("Generated {} candidates for '{}'", candidates.len(), query);

        let quotes = self.resolver.resolve(&candidates).await?;
        let shaped = shape(quotes, Some(self.search_limit));
        if !shaped.is_empty() {
            return Ok(shaped);
        }
        self.seed_fallback(query).await
    }

    async fn name_pipeline(&self, query: &str) -> Result<Vec<Quote>, MarketDataError> {
        let candidates = self.generator.generate_name_patterns(query);
        debug!("Generated {} name candidates for '{}'", candidates.len(), query);

        let quotes = self.resolver.resolve(&candidates).await?;
        Ok(shape(quotes, Some(self.search_limit)))
    }

    /// Seed symbols containing the query, case-insensitively.
    async fn seed_fallback(&self, query: &str) -> Result<Vec<Quote>, MarketDataError> {
        let needle = query.trim().to_lowercase();
        let seeds: Vec<&str> = self
            .seed_symbols
            .iter()
            .filter(|s| s.to_lowercase().contains(&needle))
            .take(SEED_FALLBACK_LIMIT)
            .map(String::as_str)
            .collect();
        if seeds.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Falling back to seed symbols {:?} for '{}'", seeds, query);
        let quotes = self.resolver.resolve_symbols(seeds).await?;
        Ok(shape(quotes, Some(self.search_limit)))
    }
}

#[async_trait]
impl StockServiceTrait for StockService {
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, MarketDataError> {
        let normalized: Vec<String> = symbols
            .iter()
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        let quotes = self
            .resolver
            .resolve_symbols(normalized.iter().map(String::as_str))
            .await?;
        Ok(shape(quotes, None))
    }

    async fn search(&self, query: &str) -> Result<Vec<Quote>, MarketDataError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.symbol_pipeline(query).await
    }

    async fn discover(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<Vec<Quote>, MarketDataError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        match search_type {
            SearchType::Symbol => self.symbol_pipeline(query).await,
            SearchType::Name => self.name_pipeline(query).await,
            SearchType::All => {
                let (by_symbol, by_name) =
                    tokio::join!(self.symbol_pipeline(query), self.name_pipeline(query));
                match (by_symbol, by_name) {
                    (Err(e), Err(_)) => Err(e),
                    (by_symbol, by_name) => Ok(union(
                        by_symbol.unwrap_or_default(),
                        by_name.unwrap_or_default(),
                    )),
                }
            }
        }
    }

    async fn market_summary(&self) -> Result<MarketSummary, MarketDataError> {
        self.aggregator.summarize(&self.universe).await
    }

    async fn history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<Vec<HistoricalBar>, MarketDataError> {
        let symbol = symbol.trim().to_uppercase();
        let end = Utc::now();
        let start = period.start_from(end);
        self.resolver
            .provider()
            .history(&symbol, start, end)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeProvider;
    use rust_decimal_macros::dec;

    fn service(provider: FakeProvider) -> (StockService, Arc<FakeProvider>) {
        service_with(provider, StockServiceConfig::default())
    }

    fn service_with(
        provider: FakeProvider,
        config: StockServiceConfig,
    ) -> (StockService, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        (StockService::new(provider.clone(), config), provider)
    }

    fn symbols(quotes: &[Quote]) -> Vec<&str> {
        quotes.iter().map(|q| q.symbol.as_str()).collect()
    }

    #[tokio::test]
    async fn test_discover_direct_symbol() {
        let (service, _) = service(FakeProvider::new().with_quote("AAPL", dec!(190), dec!(188)));

        let quotes = service.discover("AAPL", SearchType::Symbol).await.unwrap();

        assert_eq!(symbols(&quotes), vec!["AAPL"]);
    }

    #[tokio::test]
    async fn test_discover_company_name() {
        let (service, _) = service(FakeProvider::new().with_quote("IBM", dec!(170), dec!(171)));
        let query = "International Business Machines";

        let by_name = service.discover(query, SearchType::Name).await.unwrap();
        let by_all = service.discover(query, SearchType::All).await.unwrap();

        assert_eq!(symbols(&by_name), vec!["IBM"]);
        assert_eq!(symbols(&by_all), vec!["IBM"]);
    }

    #[tokio::test]
    async fn test_discover_all_unions_without_retruncating() {
        let config = StockServiceConfig {
            search_limit: 1,
            ..StockServiceConfig::default()
        };
        let (service, _) = service_with(
            FakeProvider::new()
                .with_quote("BRK.B", dec!(410), dec!(400))
                .with_quote("BRK", dec!(1), dec!(1)),
            config,
        );

        let by_symbol = service.discover("brk-b", SearchType::Symbol).await.unwrap();
        let by_name = service.discover("brk-b", SearchType::Name).await.unwrap();
        let by_all = service.discover("brk-b", SearchType::All).await.unwrap();

        assert_eq!(symbols(&by_symbol), vec!["BRK.B"]);
        assert_eq!(symbols(&by_name), vec!["BRK"]);
        assert_eq!(symbols(&by_all), vec!["BRK.B", "BRK"]);
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_calls() {
        let (service, provider) = service(FakeProvider::new());

        assert!(service.search("   ").await.unwrap().is_empty());
        assert!(service.discover("", SearchType::All).await.unwrap().is_empty());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_falls_back_to_seed_list() {
        let (service, provider) = service(
            FakeProvider::new()
                .with_quote("AAPL", dec!(190), dec!(188))
                .with_quote("PYPL", dec!(60), dec!(61)),
        );

        let quotes = service.search("pl").await.unwrap();

        assert_eq!(symbols(&quotes), vec!["AAPL", "PYPL"]);
        assert!(provider.calls().contains(&"PL".to_string()));
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let mut provider = FakeProvider::new();
        for symbol in ["AB", "ABA", "ABB", "AB1", "AB.TO", "AB.L"] {
            provider = provider.with_quote(symbol, dec!(1), dec!(1));
        }
        let config = StockServiceConfig {
            search_limit: 3,
            ..StockServiceConfig::default()
        };
        let (service, _) = service_with(provider, config);

        let quotes = service.search("ab").await.unwrap();

        assert_eq!(symbols(&quotes), vec!["AB", "ABA", "ABB"]);
    }

    #[tokio::test]
    async fn test_get_quotes_normalizes_and_dedups() {
        let (service, _) = service(
            FakeProvider::new()
                .with_quote("AAPL", dec!(190), dec!(188))
                .with_quote("MSFT", dec!(410), dec!(415)),
        );
        let requested: Vec<String> = [" aapl ", "", "msft", "AAPL", "nope"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let quotes = service.get_quotes(&requested).await.unwrap();

        assert_eq!(symbols(&quotes), vec!["AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn test_get_quotes_surfaces_upstream_failure() {
        let (service, _) = service(FakeProvider::new().offline());

        let err = service
            .get_quotes(&["AAPL".to_string()])
            .await
            .unwrap_err();

        assert!(err.is_upstream_failure());
    }

    #[tokio::test]
    async fn test_market_summary_uses_universe() {
        let config = StockServiceConfig {
            universe: vec!["UP".to_string(), "DOWN".to_string()],
            ..StockServiceConfig::default()
        };
        let (service, provider) = service_with(
            FakeProvider::new()
                .with_quote("UP", dec!(110), dec!(100))
                .with_quote("DOWN", dec!(90), dec!(100)),
            config,
        );

        let summary = service.market_summary().await.unwrap();

        assert_eq!(symbols(&summary.gainers), vec!["UP"]);
        assert_eq!(symbols(&summary.losers), vec!["DOWN"]);
        assert_eq!(provider.calls(), vec!["UP".to_string(), "DOWN".to_string()]);
    }

    #[tokio::test]
    async fn test_history_not_supported_by_provider() {
        let (service, _) = service(FakeProvider::new());

        let err = service
            .history("aapl", HistoryPeriod::OneMonth)
            .await
            .unwrap_err();

        assert!(matches!(err, MarketDataError::NotSupported { .. }));
    }
}
