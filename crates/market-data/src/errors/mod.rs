//! Error types for the market data crate.
//!
//! Failures come in two granularities:
//! - per-symbol failures, which the resolver absorbs and never surfaces
//! - whole-batch failures ([`MarketDataError::ProviderUnavailable`]), which
//!   callers turn into a user-visible error

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider does not implement the requested operation.
    #[error("Operation {operation} not supported by {provider}")]
    NotSupported {
        /// The operation that was attempted (e.g. "history")
        operation: String,
        /// The provider that rejected it
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider did not settle within its timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider answered, but the payload could not be turned into a quote.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// No data available for the requested date range.
    #[error("No data for date range")]
    NoDataForRange,

    /// Every lookup in a non-empty batch failed for transport reasons.
    #[error("Quote provider unavailable ({attempted} lookups failed)")]
    ProviderUnavailable {
        /// Number of lookups that were attempted
        attempted: usize,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns `true` when the provider answered but the symbol is unusable.
    ///
    /// These are the expected, frequent outcomes of guessing candidates and
    /// say nothing about provider health.
    pub fn is_unresolved_symbol(&self) -> bool {
        matches!(
            self,
            Self::SymbolNotFound(_) | Self::ValidationFailed { .. }
        )
    }

    /// Returns `true` for errors that abort a whole operation rather than a
    /// single symbol.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { .. })
    }
}
