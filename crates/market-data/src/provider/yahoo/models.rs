//! Yahoo Finance API response models.
//!
//! These models parse the quoteSummary API responses for the `price` and
//! `summaryDetail` modules.

use serde::Deserialize;

use crate::errors::MarketDataError;

use super::PROVIDER_ID;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
///
/// Unknown symbols come back as `"result": null` with an `error` object.
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Option<Vec<YahooQuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

impl YahooQuoteSummary {
    /// The first result, or the reason there is none.
    ///
    /// A `Not Found` error (or no error at all) means the symbol is unknown;
    /// any other error code is a provider failure.
    pub fn into_first_result(
        self,
        symbol: &str,
    ) -> Result<YahooQuoteSummaryResult, MarketDataError> {
        if let Some(result) = self.result.and_then(|results| results.into_iter().next()) {
            return Ok(result);
        }
        match self.error {
            Some(YahooApiError {
                code: Some(code),
                description,
            }) if !code.eq_ignore_ascii_case("Not Found") => {
                Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: description.unwrap_or(code),
                })
            }
            _ => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct YahooApiError {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_detail: Option<YahooSummaryDetail>,
}

/// Price data from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub regular_market_price: Option<YahooPriceDetail>,
    pub regular_market_previous_close: Option<YahooPriceDetail>,
    pub regular_market_open: Option<YahooPriceDetail>,
    pub regular_market_day_high: Option<YahooPriceDetail>,
    pub regular_market_day_low: Option<YahooPriceDetail>,
    pub regular_market_volume: Option<YahooPriceDetail>,
    pub market_cap: Option<YahooPriceDetail>,
}

/// Price detail with raw and formatted values
///
/// Yahoo sends `{}` when a value is unavailable.
#[derive(Debug, Deserialize, Clone)]
pub struct YahooPriceDetail {
    pub raw: Option<f64>,
}

/// Summary detail data (financial metrics)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryDetail {
    pub previous_close: Option<YahooPriceDetail>,
    pub open: Option<YahooPriceDetail>,
    pub day_low: Option<YahooPriceDetail>,
    pub day_high: Option<YahooPriceDetail>,
    pub volume: Option<YahooPriceDetail>,
    pub market_cap: Option<YahooPriceDetail>,
    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<YahooPriceDetail>,
    pub dividend_yield: Option<YahooPriceDetail>,
    pub fifty_two_week_high: Option<YahooPriceDetail>,
    pub fifty_two_week_low: Option<YahooPriceDetail>,
}

/// Raw value of an optional `{raw, fmt}` field.
pub fn raw(detail: &Option<YahooPriceDetail>) -> Option<f64> {
    detail.as_ref().and_then(|d| d.raw)
}
