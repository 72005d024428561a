//! Symbol discovery: generate candidates, verify them, shape the result.
//!
//! ```text
//! query -> CandidateGenerator -> QuoteResolver -> shape -> quotes
//! universe ----------------------^            \-> MarketSummary::rank
//! ```

mod candidates;
mod market_summary;
mod resolver;
mod shaper;

pub use candidates::CandidateGenerator;
pub use market_summary::MarketSummaryAggregator;
pub use resolver::QuoteResolver;
pub use shaper::{shape, union};
