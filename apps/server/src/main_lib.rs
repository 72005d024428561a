use std::sync::Arc;

use crate::config::Config;
use quotescout_market_data::{
    StockService, StockServiceConfig, StockServiceTrait, YahooProvider,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub stock_service: Arc<dyn StockServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("QS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = Arc::new(YahooProvider::new(config.provider_timeout)?);
    tracing::info!(
        "Market universe: {} symbols, search limit {}",
        config.market_universe.len(),
        config.search_limit
    );

    let defaults = StockServiceConfig::default();
    let stock_service = Arc::new(StockService::new(
        provider,
        StockServiceConfig {
            universe: config.market_universe.clone(),
            seed_symbols: defaults.seed_symbols,
            search_limit: config.search_limit,
            provider_timeout: config.provider_timeout,
        },
    ));

    Ok(Arc::new(AppState { stock_service }))
}
