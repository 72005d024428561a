use std::collections::HashSet;

use crate::models::Quote;

/// Deduplicate by symbol, keeping the first occurrence, then truncate.
///
/// First-wins preserves the strategy priority established during candidate
/// generation. `None` means no limit.
pub fn shape<I>(quotes: I, limit: Option<usize>) -> Vec<Quote>
where
    I: IntoIterator<Item = Quote>,
{
    let limit = limit.unwrap_or(usize::MAX);
    let mut seen = HashSet::new();
    quotes
        .into_iter()
        .filter(|q| seen.insert(q.symbol.clone()))
        .take(limit)
        .collect()
}

/// Union of two shaped lists by symbol, `primary` entries first.
pub fn union(primary: Vec<Quote>, secondary: Vec<Quote>) -> Vec<Quote> {
    shape(primary.into_iter().chain(secondary), None)
}
