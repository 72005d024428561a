//! Static configuration data shared by the discovery pipelines.

use std::time::Duration;

/// Popular large-cap symbols. Serves as the market summary universe and as
/// the seed list searched when no generated candidate resolves.
pub const DEFAULT_UNIVERSE: [&str; 18] = [
    "AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "NVDA", "META", "BRK-B", "JPM", "JNJ", "V", "PG",
    "UNH", "HD", "MA", "DIS", "PYPL", "ADBE",
];

/// Yahoo exchange suffixes tried for every query
/// (Toronto, TSX Venture, ASX, London, Paris, Frankfurt, SIX, Milan).
pub const EXCHANGE_SUFFIXES: [&str; 8] = [".TO", ".V", ".AX", ".L", ".PA", ".F", ".SW", ".MI"];

/// Maximum quotes returned by search and discovery.
pub const SEARCH_RESULT_LIMIT: usize = 15;

/// Maximum seed symbols resolved by the search fallback.
pub const SEED_FALLBACK_LIMIT: usize = 5;

/// Per-lookup timeout used when none is configured.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(8);
