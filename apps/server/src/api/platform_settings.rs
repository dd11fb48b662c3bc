use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use payoutfolio_core::{
    fx::{CurrencyCode, Money},
    platform_fees::{FeeBreakdown, FeeProfile, NewFeeProfile},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ApiJson;
use crate::{auth::AuthenticatedUser, error::ApiResult, main_lib::AppState};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlatformSettingsListing {
    custom: Vec<FeeProfile>,
    well_known: Vec<FeeProfile>,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequest {
    platform_name: String,
    amount: Decimal,
    currency: CurrencyCode,
    /// Defaults to `currency`.
    target_currency: Option<CurrencyCode>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedBreakdown {
    gross: String,
    total_fees: String,
    net: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteResponse {
    platform: FeeProfile,
    breakdown: FeeBreakdown,
    formatted: FormattedBreakdown,
}

async fn list_platform_settings(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> ApiResult<Json<PlatformSettingsListing>> {
    state.fee_profile_service.ensure_well_known_seeded().await?;
    let custom = state.fee_profile_service.list_mine(&user_id)?;
    let well_known = state.fee_profile_service.list_well_known()?;
    Ok(Json(PlatformSettingsListing { custom, well_known }))
}

async fn get_effective_platform_settings(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(platform_name): Path<String>,
) -> ApiResult<Json<FeeProfile>> {
    let profile = state
        .fee_profile_service
        .resolve(&user_id, &platform_name)?;
    Ok(Json(profile))
}

async fn get_platform_settings(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Json<FeeProfile>> {
    let profile = state.fee_profile_service.get(&user_id, &id)?;
    Ok(Json(profile))
}

async fn create_platform_settings(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiJson(profile): ApiJson<NewFeeProfile>,
) -> ApiResult<Json<FeeProfile>> {
    let created = state
        .fee_profile_service
        .create(&user_id, profile)
        .await?;
    Ok(Json(created))
}

async fn delete_platform_settings(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.fee_profile_service.delete(&user_id, &id).await?;
    Ok(Json(MessageResponse {
        message: "Platform settings deleted".to_string(),
    }))
}

async fn quote_withdrawal(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    ApiJson(request): ApiJson<QuoteRequest>,
) -> ApiResult<Json<QuoteResponse>> {
    let platform = state
        .fee_profile_service
        .resolve(&user_id, &request.platform_name)?;
    let target = request.target_currency.unwrap_or(request.currency);
    let breakdown = state.fee_calculator.compute_total_cost(
        &platform,
        &Money::new(request.amount, request.currency),
        target,
    )?;
    let formatted = FormattedBreakdown {
        gross: state.converter.format(breakdown.gross, target),
        total_fees: state.converter.format(breakdown.total_fees, target),
        net: state.converter.format(breakdown.net, target),
    };
    Ok(Json(QuoteResponse {
        platform,
        breakdown,
        formatted,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/platform-settings",
            get(list_platform_settings).post(create_platform_settings),
        )
        .route("/platform-settings/quote", post(quote_withdrawal))
        .route(
            "/platform-settings/effective/{platform_name}",
            get(get_effective_platform_settings),
        )
        .route(
            "/platform-settings/{id}",
            get(get_platform_settings).delete(delete_platform_settings),
        )
}
