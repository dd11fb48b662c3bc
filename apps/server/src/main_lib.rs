use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, config::Config};
use payoutfolio_core::{
    fx::{CurrencyConverter, RateTable},
    platform_fees::{FeeChainCalculator, FeeProfileServiceTrait, PlatformFeeRegistry},
};
use payoutfolio_storage_sqlite::{
    db::{self, write_actor},
    platform_fees::PlatformFeeRepository,
};

pub struct AppState {
    pub fee_profile_service: Arc<dyn FeeProfileServiceTrait>,
    pub converter: CurrencyConverter,
    pub fee_calculator: FeeChainCalculator,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
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

fn load_rate_table(config: &Config) -> anyhow::Result<RateTable> {
    let Some(path) = &config.fx_rates_file else {
        return Ok(RateTable::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rate table {}", path.display()))?;
    let table = RateTable::from_json_str(&raw)
        .with_context(|| format!("Invalid rate table in {}", path.display()))?;
    tracing::info!("Loaded exchange rates from {}", path.display());
    Ok(table)
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let fee_repository = Arc::new(PlatformFeeRepository::new(pool.clone(), writer.clone()));
    let fee_profile_service: Arc<dyn FeeProfileServiceTrait> =
        Arc::new(PlatformFeeRegistry::new(fee_repository));
    // Advisory; failures are logged inside and retried on the next listing.
    fee_profile_service.ensure_well_known_seeded().await?;

    let rates = Arc::new(load_rate_table(config)?);
    let converter = CurrencyConverter::new(rates);
    let fee_calculator = FeeChainCalculator::new(converter.clone());

    let auth = Arc::new(AuthManager::new(&config.jwt_secret, config.auth_cookie.clone()));

    Ok(Arc::new(AppState {
        fee_profile_service,
        converter,
        fee_calculator,
        auth,
    }))
}
