use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quote::Quote;

/// Number of quotes kept in each market summary bucket.
pub const SUMMARY_BUCKET_SIZE: usize = 5;

/// Gainers, losers and most active quotes over a fixed universe.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub gainers: Vec<Quote>,
    pub losers: Vec<Quote>,
    pub most_active: Vec<Quote>,
}

impl MarketSummary {
    /// Rank resolved quotes into the three buckets.
    ///
    /// Flat quotes (`change == 0`) are only eligible for `most_active`.
    /// Sorts are stable, so ties keep resolution order.
    pub fn rank(quotes: &[Quote]) -> Self {
        let mut gainers: Vec<Quote> = quotes
            .iter()
            .filter(|q| q.change > Decimal::ZERO)
            .cloned()
            .collect();
        gainers.sort_by(|a, b| b.change_percent.cmp(&a.change_percent));
        gainers.truncate(SUMMARY_BUCKET_SIZE);

        let mut losers: Vec<Quote> = quotes
            .iter()
            .filter(|q| q.change < Decimal::ZERO)
            .cloned()
            .collect();
        losers.sort_by(|a, b| a.change_percent.cmp(&b.change_percent));
        losers.truncate(SUMMARY_BUCKET_SIZE);

        let mut most_active = quotes.to_vec();
        most_active.sort_by_key(|q| std::cmp::Reverse(q.volume_or_zero()));
        most_active.truncate(SUMMARY_BUCKET_SIZE);

        Self {
            gainers,
            losers,
            most_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(symbol: &str, price: Decimal, volume: Option<u64>) -> Quote {
        Quote::new(symbol, None, price, dec!(100), dec!(100)).with_volume(volume)
    }

    #[test]
    fn test_rank_partitions_by_change() {
        let quotes = vec![
            quote("UP1", dec!(101), Some(10)),
            quote("DOWN1", dec!(97), Some(20)),
            quote("FLAT", dec!(100), Some(1_000)),
            quote("UP2", dec!(108), None),
            quote("DOWN2", dec!(99.5), Some(5)),
        ];

        let summary = MarketSummary::rank(&quotes);

        let gainers: Vec<&str> = summary.gainers.iter().map(|q| q.symbol.as_str()).collect();
        let losers: Vec<&str> = summary.losers.iter().map(|q| q.symbol.as_str()).collect();
        let active: Vec<&str> = summary
            .most_active
            .iter()
            .map(|q| q.symbol.as_str())
            .collect();

        assert_eq!(gainers, vec!["UP2", "UP1"]);
        assert_eq!(losers, vec!["DOWN1", "DOWN2"]);
        assert_eq!(active, vec!["FLAT", "DOWN1", "UP1", "DOWN2", "UP2"]);
    }

    #[test]
    fn test_rank_caps_buckets() {
        let quotes: Vec<Quote> = (1..=8)
            .map(|i| quote(&format!("G{}", i), dec!(100) + Decimal::from(i), Some(i)))
            .collect();

        let summary = MarketSummary::rank(&quotes);

        assert_eq!(summary.gainers.len(), SUMMARY_BUCKET_SIZE);
        assert!(summary.losers.is_empty());
        assert_eq!(summary.most_active.len(), SUMMARY_BUCKET_SIZE);
        assert_eq!(summary.gainers[0].symbol, "G8");
        assert!(summary
            .gainers
            .windows(2)
            .all(|w| w[0].change_percent >= w[1].change_percent));
    }

    #[test]
    fn test_rank_empty() {
        let summary = MarketSummary::rank(&[]);
        assert!(summary.gainers.is_empty());
        assert!(summary.losers.is_empty());
        assert!(summary.most_active.is_empty());
    }
}
