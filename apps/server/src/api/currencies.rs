use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use payoutfolio_core::fx::{CurrencyCode, CurrencyInfo, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ApiJson;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvertRequest {
    amount: Decimal,
    from: CurrencyCode,
    to: CurrencyCode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SumRequest {
    amounts: Vec<Money>,
    to: CurrencyCode,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConvertedAmount {
    amount: Decimal,
    currency: CurrencyCode,
    formatted: String,
}

async fn list_currencies(State(state): State<Arc<AppState>>) -> Json<Vec<CurrencyInfo>> {
    Json(state.converter.currencies())
}

async fn convert_amount(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ConvertRequest>,
) -> ApiResult<Json<ConvertedAmount>> {
    let amount = state
        .converter
        .convert(request.amount, request.from, request.to)?;
    Ok(Json(ConvertedAmount {
        amount,
        currency: request.to,
        formatted: state.converter.format(amount, request.to),
    }))
}

async fn sum_amounts(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<SumRequest>,
) -> ApiResult<Json<ConvertedAmount>> {
    let amount = state.converter.sum(&request.amounts, request.to)?;
    Ok(Json(ConvertedAmount {
        amount,
        currency: request.to,
        formatted: state.converter.format(amount, request.to),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/currencies", get(list_currencies))
        .route("/currencies/convert", post(convert_amount))
        .route("/currencies/sum", post(sum_amounts))
}
