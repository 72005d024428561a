//! Quote provider trait definition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{HistoricalBar, Quote};

/// An external source of per-symbol quotes.
///
/// Lookups are exact-symbol only: there is no multi-symbol or name-based
/// search. Any error means "this symbol is not resolvable right now".
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use quotescout_market_data::{MarketDataError, Quote, QuoteProvider};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Err(MarketDataError::SymbolNotFound(symbol.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the current quote for `symbol`.
    ///
    /// The returned quote's symbol must be `symbol` upper-cased.
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetch daily bars between `start` and `end`, oldest first.
    ///
    /// Default implementation returns `NotSupported`.
    async fn history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HistoricalBar>, MarketDataError> {
        let _ = (symbol, start, end);
        Err(MarketDataError::NotSupported {
            operation: "history".to_string(),
            provider: self.id().to_string(),
        })
    }
}
