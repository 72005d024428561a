//! QuoteScout Market Data Crate
//!
//! Stock discovery on top of a quote provider that only answers exact-symbol
//! lookups.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +--------------------+
//! |   StockService   | --> | CandidateGenerator |  (query -> ticker guesses)
//! +------------------+     +--------------------+
//!          |                         |
//!          |                         v
//!          |               +--------------------+
//!          +-------------> |   QuoteResolver    |  (concurrent lookups)
//!                          +--------------------+
//!                                    |
//!                                    v
//!                          +--------------------+
//!                          |   QuoteProvider    |  (Yahoo Finance)
//!                          +--------------------+
//! ```
//!
//! Resolved quotes are deduplicated and truncated by [`shape`], or ranked into
//! a [`MarketSummary`] for the fixed universe.
//!
//! # Core Types
//!
//! - [`Quote`] - Resolved market snapshot for one symbol
//! - [`Candidate`] - Normalized symbol guess
//! - [`SearchType`] - Which discovery pipeline to run
//! - [`MarketSummary`] - Top gainers, losers and most active

pub mod constants;
pub mod discovery;
pub mod errors;
pub mod models;
pub mod provider;
pub mod service;

#[cfg(test)]
mod test_support;

pub use discovery::{shape, union, CandidateGenerator, MarketSummaryAggregator, QuoteResolver};
pub use errors::MarketDataError;
pub use models::{
    Candidate, HistoricalBar, HistoryPeriod, MarketSummary, PriceRange, Quote, SearchType,
};
pub use provider::yahoo::YahooProvider;
pub use provider::QuoteProvider;
pub use service::{StockService, StockServiceConfig, StockServiceTrait};
