//! Market data models
//!
//! This module contains the core data types:
//! - `quote` - Resolved market snapshot (Quote, PriceRange)
//! - `candidate` - Normalized symbol guesses (Candidate)
//! - `search` - Discovery pipeline selector (SearchType)
//! - `summary` - Gainers/losers/most active buckets (MarketSummary)
//! - `history` - Historical bars and lookback periods (HistoricalBar, HistoryPeriod)

mod candidate;
mod history;
mod quote;
mod search;
mod summary;

pub use candidate::Candidate;
pub use history::{HistoricalBar, HistoryPeriod};
pub use quote::{PriceRange, Quote};
pub use search::SearchType;
pub use summary::{MarketSummary, SUMMARY_BUCKET_SIZE};
