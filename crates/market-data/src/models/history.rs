//! Historical price bars and lookback periods.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lookback window for a history request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl HistoryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneDay => "1d",
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::YearToDate => "ytd",
            Self::Max => "max",
        }
    }

    /// First instant covered by this period when asked at `now`.
    ///
    /// Months and years are fixed day counts (30 and 365); `ytd` starts on
    /// January 1st of `now`'s UTC year.
    pub fn start_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let days = match self {
            Self::OneDay => 1,
            Self::FiveDays => 5,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
            Self::TwoYears => 2 * 365,
            Self::FiveYears => 5 * 365,
            Self::TenYears => 10 * 365,
            Self::Max => 20 * 365,
            Self::YearToDate => {
                return Utc
                    .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
                    .single()
                    .unwrap_or(now);
            }
        };
        now - Duration::days(days)
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Ok(Self::OneDay),
            "5d" => Ok(Self::FiveDays),
            "1mo" => Ok(Self::OneMonth),
            "3mo" => Ok(Self::ThreeMonths),
            "6mo" => Ok(Self::SixMonths),
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            "ytd" => Ok(Self::YearToDate),
            "max" => Ok(Self::Max),
            other => Err(format!("Unknown history period: {}", other)),
        }
    }
}

/// One daily OHLCV bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalBar {
    pub date: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_round_trips_labels() {
        for label in ["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max"] {
            let period: HistoryPeriod = label.parse().unwrap();
            assert_eq!(period.as_str(), label);
        }
        assert!("2w".parse::<HistoryPeriod>().is_err());
    }

    #[test]
    fn test_default_is_one_year() {
        assert_eq!(HistoryPeriod::default(), HistoryPeriod::OneYear);
    }

    #[test]
    fn test_fixed_day_periods() {
        let now = at(2024, 6, 15);
        assert_eq!(HistoryPeriod::OneDay.start_from(now), at(2024, 6, 14));
        assert_eq!(HistoryPeriod::OneMonth.start_from(now), now - Duration::days(30));
        assert_eq!(HistoryPeriod::OneYear.start_from(now), now - Duration::days(365));
        assert_eq!(HistoryPeriod::Max.start_from(now), now - Duration::days(7300));
    }

    #[test]
    fn test_year_to_date_starts_january_first() {
        let now = at(2024, 6, 15);
        assert_eq!(
            HistoryPeriod::YearToDate.start_from(now),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }
}
