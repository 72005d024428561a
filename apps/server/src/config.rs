use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use quotescout_market_data::constants::{
    DEFAULT_PROVIDER_TIMEOUT, DEFAULT_UNIVERSE, SEARCH_RESULT_LIMIT,
};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub provider_timeout: Duration,
    pub search_limit: usize,
    pub market_universe: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            search_limit: SEARCH_RESULT_LIMIT,
            market_universe: DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = std::env::var("QS_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid QS_LISTEN_ADDR")?;
        let cors_allow = split_list(
            &std::env::var("QS_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = std::env::var("QS_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let provider_timeout = std::env::var("QS_PROVIDER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.provider_timeout);
        let search_limit = std::env::var("QS_SEARCH_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(defaults.search_limit);
        let market_universe = std::env::var("QS_MARKET_UNIVERSE")
            .ok()
            .map(|v| {
                split_list(&v)
                    .into_iter()
                    .map(|s| s.to_uppercase())
                    .collect::<Vec<_>>()
            })
            .filter(|symbols| !symbols.is_empty())
            .unwrap_or(defaults.market_universe);

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            provider_timeout,
            search_limit,
            market_universe,
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
