//! Concurrent verification of candidate symbols.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{Candidate, Quote};
use crate::provider::QuoteProvider;

/// Fans symbol lookups out to a [`QuoteProvider`] and keeps what resolves.
///
/// Every lookup runs concurrently and the resolver waits for all of them to
/// settle. Output follows submission order, not completion order. A failing
/// or slow symbol only removes itself from the result.
pub struct QuoteResolver {
    provider: Arc<dyn QuoteProvider>,
    call_timeout: Duration,
}

impl QuoteResolver {
    /// Create a resolver that gives each lookup at most `call_timeout`.
    pub fn new(provider: Arc<dyn QuoteProvider>, call_timeout: Duration) -> Self {
        Self {
            provider,
            call_timeout,
        }
    }

    pub fn provider(&self) -> &Arc<dyn QuoteProvider> {
        &self.provider
    }

    /// Resolve generated candidates.
    pub async fn resolve(&self, candidates: &[Candidate]) -> Result<Vec<Quote>, MarketDataError> {
        self.resolve_symbols(candidates.iter().map(Candidate::as_str))
            .await
    }

    /// Resolve caller-supplied symbols, one lookup per entry.
    ///
    /// Fails with [`MarketDataError::ProviderUnavailable`] only when nothing
    /// resolved and every lookup failed for a transport reason. Unknown
    /// symbols never make the batch fail.
    pub async fn resolve_symbols<'a, I>(&self, symbols: I) -> Result<Vec<Quote>, MarketDataError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let symbols: Vec<&str> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        // join_all keeps the input order regardless of completion order
        let settled = join_all(symbols.iter().map(|symbol| self.lookup(symbol))).await;

        let mut quotes = Vec::with_capacity(symbols.len());
        let mut transport_failures = 0usize;
        for (symbol, outcome) in symbols.iter().zip(settled) {
            match outcome {
                Ok(quote) if quote.symbol.eq_ignore_ascii_case(symbol.trim()) => quotes.push(quote),
                Ok(quote) => {
                    debug!(
                        "Discarding quote {} returned for candidate {}",
                        quote.symbol, symbol
                    );
                }
                Err(e) if e.is_unresolved_symbol() => {
                    debug!("Candidate {} unresolved: {}", symbol, e);
                }
                Err(e) => {
                    transport_failures += 1;
                    debug!("Lookup for {} failed: {}", symbol, e);
                }
            }
        }

        if quotes.is_empty() && transport_failures == symbols.len() {
            warn!(
                "All {} lookups against {} failed",
                symbols.len(),
                self.provider.id()
            );
            return Err(MarketDataError::ProviderUnavailable {
                attempted: symbols.len(),
            });
        }

        debug!("Resolved {} of {} symbols", quotes.len(), symbols.len());
        Ok(quotes)
    }

    /// One provider call, bounded by the per-call timeout.
    async fn lookup(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        match tokio::time::timeout(self.call_timeout, self.provider.quote(symbol)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(MarketDataError::Timeout {
                provider: self.provider.id().to_string(),
            }),
        }
    }
}
