use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quotescout_market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    MarketData(#[from] MarketDataError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::MarketData(e) => match e {
                MarketDataError::SymbolNotFound(_) | MarketDataError::NoDataForRange => {
                    (StatusCode::NOT_FOUND, e.to_string())
                }
                MarketDataError::NotSupported { .. } => {
                    (StatusCode::NOT_IMPLEMENTED, e.to_string())
                }
                // Per-symbol causes stay in the logs
                _ => {
                    tracing::error!("Market data request failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to fetch market data".to_string(),
                    )
                }
            },
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
        };
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
