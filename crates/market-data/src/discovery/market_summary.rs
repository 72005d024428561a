use std::sync::Arc;

use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::MarketSummary;

use super::resolver::QuoteResolver;

/// Resolves a fixed universe and ranks it into summary buckets.
///
/// The universe is already a list of valid symbols, so no candidates are
/// generated.
pub struct MarketSummaryAggregator {
    resolver: Arc<QuoteResolver>,
}

impl MarketSummaryAggregator {
    pub fn new(resolver: Arc<QuoteResolver>) -> Self {
        Self { resolver }
    }

    /// Buckets are computed from whichever universe symbols resolved.
    pub async fn summarize(&self, universe: &[String]) -> Result<MarketSummary, MarketDataError> {
        let quotes = self
            .resolver
            .resolve_symbols(universe.iter().map(String::as_str))
            .await?;
        debug!(
            "Market summary over {} of {} symbols",
            quotes.len(),
            universe.len()
        );
        Ok(MarketSummary::rank(&quotes))
    }
}
