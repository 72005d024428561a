use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Low/high pair for a trading range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceRange {
    pub fn new(low: Decimal, high: Decimal) -> Self {
        Self { low, high }
    }
}

/// Point-in-time market snapshot for one symbol.
///
/// Only ever built from a successful provider response. `change` and
/// `change_percent` are derived in [`Quote::new`] and `last_updated` is the
/// moment the quote was resolved, not a provider timestamp.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Canonical upper-cased ticker, unique within a result list
    pub symbol: String,

    /// Display name; the symbol itself when the provider supplies none
    pub name: String,

    pub current_price: Decimal,
    pub previous_close: Decimal,
    pub open: Decimal,

    /// `current_price - previous_close`
    pub change: Decimal,

    /// `change / previous_close * 100`, or zero without a positive close
    pub change_percent: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_range: Option<PriceRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_range: Option<PriceRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<Decimal>,

    /// Percentage, not the provider's fraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<Decimal>,

    pub last_updated: DateTime<Utc>,
}

impl Quote {
    /// Create a quote from the required price fields.
    ///
    /// The symbol is upper-cased and a missing or blank name falls back to
    /// the symbol.
    pub fn new(
        symbol: &str,
        name: Option<&str>,
        current_price: Decimal,
        previous_close: Decimal,
        open: Decimal,
    ) -> Self {
        let symbol = symbol.trim().to_uppercase();
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| symbol.clone());
        // Provider values are unvalidated; out-of-range results read as zero
        let change = current_price
            .checked_sub(previous_close)
            .unwrap_or(Decimal::ZERO);
        let change_percent = if previous_close > Decimal::ZERO {
            change
                .checked_div(previous_close)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Self {
            symbol,
            name,
            current_price,
            previous_close,
            open,
            change,
            change_percent,
            market_cap: None,
            volume: None,
            day_range: None,
            year_range: None,
            pe_ratio: None,
            dividend_yield: None,
            last_updated: Utc::now(),
        }
    }

    pub fn with_market_cap(mut self, market_cap: Option<Decimal>) -> Self {
        self.market_cap = market_cap;
        self
    }

    pub fn with_volume(mut self, volume: Option<u64>) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_day_range(mut self, range: Option<PriceRange>) -> Self {
        self.day_range = range;
        self
    }

    pub fn with_year_range(mut self, range: Option<PriceRange>) -> Self {
        self.year_range = range;
        self
    }

    pub fn with_pe_ratio(mut self, pe_ratio: Option<Decimal>) -> Self {
        self.pe_ratio = pe_ratio;
        self
    }

    /// Set the dividend yield from the provider's fraction (0.005 -> 0.5%).
    pub fn with_dividend_yield_fraction(mut self, fraction: Option<Decimal>) -> Self {
        self.dividend_yield = fraction.and_then(|f| f.checked_mul(Decimal::ONE_HUNDRED));
        self
    }

    /// Volume used for activity ranking; missing volume counts as zero.
    pub fn volume_or_zero(&self) -> u64 {
        self.volume.unwrap_or(0)
    }
}
