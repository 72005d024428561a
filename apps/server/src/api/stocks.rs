use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{DiscoverResponse, HistoryResponse, StocksResponse},
};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use quotescout_market_data::{HistoryPeriod, MarketSummary, SearchType};

#[derive(serde::Deserialize)]
struct StocksQuery {
    symbols: Option<String>,
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(serde::Deserialize)]
struct DiscoverQuery {
    q: Option<String>,
    #[serde(rename = "type")]
    search_type: Option<String>,
}

#[derive(serde::Deserialize)]
struct HistoryQuery {
    symbol: Option<String>,
    period: Option<String>,
}

/// Present and non-blank, trimmed.
fn required(value: Option<String>, name: &str) -> ApiResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required parameter: {}", name)))
}

async fn get_stocks(
    State(state): State<Arc<AppState>>,
    Query(q): Query<StocksQuery>,
) -> ApiResult<Json<StocksResponse>> {
    let raw = required(q.symbols, "symbols")?;
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing required parameter: symbols".to_string(),
        ));
    }

    let stocks = state.stock_service.get_quotes(&symbols).await?;
    Ok(Json(StocksResponse { stocks }))
}

async fn search_stocks(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> ApiResult<Json<StocksResponse>> {
    let query = required(q.q, "q")?;

    let stocks = match state.stock_service.search(&query).await {
        Ok(stocks) => stocks,
        Err(e) => {
            tracing::warn!("Search for '{}' failed, returning no results: {}", query, e);
            Vec::new()
        }
    };
    Ok(Json(StocksResponse { stocks }))
}

async fn discover_stocks(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DiscoverQuery>,
) -> ApiResult<Json<DiscoverResponse>> {
    let query = required(q.q, "q")?;
    // Unrecognized types run the symbol pipeline
    let search_type = match q.search_type.as_deref().map(str::trim) {
        None | Some("") => SearchType::default(),
        Some(raw) => raw.parse::<SearchType>().unwrap_or_else(|e| {
            tracing::debug!("{}, using {}", e, SearchType::default());
            SearchType::default()
        }),
    };

    let stocks = state.stock_service.discover(&query, search_type).await?;
    Ok(Json(DiscoverResponse::new(stocks, search_type, query)))
}

async fn get_market_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<MarketSummary>> {
    let summary = state.stock_service.market_summary().await?;
    Ok(Json(summary))
}

async fn get_stock_history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let symbol = required(q.symbol, "symbol")?.to_uppercase();
    let period = match q.period.as_deref().map(str::trim) {
        None | Some("") => HistoryPeriod::default(),
        Some(raw) => raw.parse::<HistoryPeriod>().map_err(ApiError::BadRequest)?,
    };

    let bars = state.stock_service.history(&symbol, period).await?;
    Ok(Json(HistoryResponse {
        symbol,
        period,
        bars,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks", get(get_stocks))
        .route("/stocks/search", get(search_stocks))
        .route("/stocks/discover", get(discover_stocks))
        .route("/stocks/market-summary", get(get_market_summary))
        .route("/stocks/history", get(get_stock_history))
}
