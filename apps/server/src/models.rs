use quotescout_market_data::{HistoricalBar, HistoryPeriod, Quote, SearchType};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StocksResponse {
    pub stocks: Vec<Quote>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverResponse {
    pub stocks: Vec<Quote>,
    pub search_type: SearchType,
    pub query: String,
    pub results_count: usize,
}

impl DiscoverResponse {
    pub fn new(stocks: Vec<Quote>, search_type: SearchType, query: String) -> Self {
        Self {
            results_count: stocks.len(),
            stocks,
            search_type,
            query,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HistoryResponse {
    pub symbol: String,
    pub period: HistoryPeriod,
    pub bars: Vec<HistoricalBar>,
}
