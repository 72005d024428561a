//! Yahoo Finance quote provider.
//!
//! Latest quotes come from the quoteSummary API (`price` and `summaryDetail`
//! modules), which needs a cookie/crumb pair. Daily history goes through the
//! `yahoo_finance_api` connector.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{HistoricalBar, PriceRange, Quote};
use crate::provider::QuoteProvider;

use models::{raw, YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance quote provider.
pub struct YahooProvider {
    client: reqwest::Client,
    connector: yahoo::YahooConnector,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a provider whose HTTP calls give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            provider_error(format!("Failed to initialize Yahoo connector: {}", e))
        })?;
        Ok(Self {
            client,
            connector,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Return the cached crumb, fetching one if none is cached.
    ///
    /// The write lock is held while fetching so a burst of concurrent lookups
    /// performs a single handshake.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let mut guard = self.crumb.write().await;
        if let Some(crumb) = guard.as_ref() {
            return Ok(crumb.clone());
        }
        let crumb = self.fetch_crumb().await.map_err(|e| {
            warn!("Yahoo crumb handshake failed: {}", e);
            e
        })?;
        *guard = Some(crumb.clone());
        Ok(crumb)
    }

    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        debug!("Fetching Yahoo crumb");

        let response = self
            .client
            .get(COOKIE_URL)
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| provider_error("Failed to parse Yahoo cookie".to_string()))?;

        let crumb = self
            .client
            .get(CRUMB_URL)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| provider_error(format!("Failed to read crumb: {}", e)))?;

        Ok(CrumbData { cookie, crumb })
    }

    async fn clear_crumb(&self) {
        *self.crumb.write().await = None;
    }

    // ========================================================================
    // Quote Fetching
    // ========================================================================

    async fn fetch_quote_summary(
        &self,
        symbol: &str,
    ) -> Result<YahooQuoteSummaryResult, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "{}/{}?modules=price,summaryDetail&crumb={}",
            QUOTE_SUMMARY_URL,
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            StatusCode::UNAUTHORIZED => {
                self.clear_crumb().await;
                return Err(provider_error("Yahoo authentication expired".to_string()));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            status if !status.is_success() => {
                return Err(provider_error(format!(
                    "Unexpected status {} for {}",
                    status, symbol
                )));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse quote response: {}", e)))?;

        data.quote_summary.into_first_result(symbol)
    }

    /// Convert a Yahoo bar to our model; `None` for bars with unusable values.
    fn yahoo_bar_to_bar(bar: &yahoo::Quote) -> Option<HistoricalBar> {
        Some(HistoricalBar {
            date: Utc.timestamp_opt(bar.timestamp as i64, 0).single()?,
            open: Decimal::from_f64(bar.open)?,
            high: Decimal::from_f64(bar.high)?,
            low: Decimal::from_f64(bar.low)?,
            close: Decimal::from_f64(bar.close)?,
            volume: bar.volume,
        })
    }
}

// ============================================================================
// QuoteProvider Implementation
// ============================================================================

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching quote for {} from Yahoo", symbol);
        let result = self.fetch_quote_summary(symbol).await?;
        map_summary_to_quote(symbol, &result)
    }

    async fn history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<HistoricalBar>, MarketDataError> {
        debug!(
            "Fetching history for {} from {} to {} from Yahoo",
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let response = self
            .connector
            .get_quote_history(symbol, to_offset_datetime(start), to_offset_datetime(end))
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    provider_error(e.to_string())
                }
            })?;

        let yahoo_bars = match response.quotes() {
            Ok(bars) => bars,
            Err(yahoo::YahooError::NoQuotes) => return Err(MarketDataError::NoDataForRange),
            Err(e) => return Err(provider_error(e.to_string())),
        };

        let bars: Vec<HistoricalBar> = yahoo_bars
            .iter()
            .filter_map(|bar| {
                let converted = Self::yahoo_bar_to_bar(bar);
                if converted.is_none() {
                    warn!("Skipping unusable bar for {} at {}", symbol, bar.timestamp);
                }
                converted
            })
            .collect();

        if bars.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(bars)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn provider_error(message: String) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message,
    }
}

fn to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(dt.timestamp()).unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

fn whole(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u64)
}

fn range(low: Option<f64>, high: Option<f64>) -> Option<PriceRange> {
    Some(PriceRange::new(decimal(low)?, decimal(high)?))
}

/// Build a quote from a quoteSummary result.
///
/// `price` data wins over `summaryDetail` where both carry a field. A result
/// without a usable market price is rejected.
fn map_summary_to_quote(
    symbol: &str,
    result: &YahooQuoteSummaryResult,
) -> Result<Quote, MarketDataError> {
    let price = result
        .price
        .as_ref()
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;
    let detail = result.summary_detail.as_ref();

    let current_price = decimal(raw(&price.regular_market_price)).ok_or_else(|| {
        MarketDataError::ValidationFailed {
            message: format!("No valid price for {}", symbol),
        }
    })?;

    let previous_close = decimal(
        raw(&price.regular_market_previous_close)
            .or_else(|| detail.and_then(|d| raw(&d.previous_close))),
    )
    .unwrap_or(Decimal::ZERO);

    let open = decimal(
        raw(&price.regular_market_open).or_else(|| detail.and_then(|d| raw(&d.open))),
    )
    .unwrap_or(Decimal::ZERO);

    let name = format_name(
        price.long_name.as_deref(),
        price.short_name.as_deref(),
        symbol,
    );

    let day_range = range(
        raw(&price.regular_market_day_low).or_else(|| detail.and_then(|d| raw(&d.day_low))),
        raw(&price.regular_market_day_high).or_else(|| detail.and_then(|d| raw(&d.day_high))),
    );

    Ok(Quote::new(symbol, Some(&name), current_price, previous_close, open)
        .with_market_cap(decimal(
            raw(&price.market_cap).or_else(|| detail.and_then(|d| raw(&d.market_cap))),
        ))
        .with_volume(whole(
            raw(&price.regular_market_volume).or_else(|| detail.and_then(|d| raw(&d.volume))),
        ))
        .with_day_range(day_range)
        .with_year_range(detail.and_then(|d| {
            range(raw(&d.fifty_two_week_low), raw(&d.fifty_two_week_high))
        }))
        .with_pe_ratio(detail.and_then(|d| decimal(raw(&d.trailing_pe))))
        .with_dividend_yield_fraction(detail.and_then(|d| decimal(raw(&d.dividend_yield)))))
}

/// Pick the display name: long name, then short name, then the symbol.
fn format_name(long_name: Option<&str>, short_name: Option<&str>, symbol: &str) -> String {
    [long_name, short_name]
        .into_iter()
        .flatten()
        .map(|n| n.replace("&amp;", "&").trim().to_string())
        .find(|n| !n.is_empty())
        .unwrap_or_else(|| symbol.to_uppercase())
}

// ============================================================================
// Tests
// ============================================================================
