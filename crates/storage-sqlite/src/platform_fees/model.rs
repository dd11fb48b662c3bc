//! Database models for platform fee profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use payoutfolio_core::fx::CurrencyCode;
use payoutfolio_core::platform_fees::{FeeLeg, FeeLegs, FeeProfile, NewFeeProfile, OwnerScope};

const SYSTEM_SCOPE: &str = "system";
const USER_SCOPE_PREFIX: &str = "user:";

/// Database model for platform fee profiles.
///
/// Decimals are stored as TEXT and each optional leg as an amount/currency column pair.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::platform_fee_settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PlatformFeeSettingDB {
    pub id: String,
    pub platform_name: String,
    pub platform_fee_percentage: String,
    pub platform_to_payoneer_amount: Option<String>,
    pub platform_to_payoneer_currency: Option<String>,
    pub platform_to_local_bank_amount: Option<String>,
    pub platform_to_local_bank_currency: Option<String>,
    pub payoneer_to_local_bank_amount: Option<String>,
    pub payoneer_to_local_bank_currency: Option<String>,
    pub is_custom: bool,
    pub owner_scope: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PlatformFeeSettingDB {
    /// Builds a row for a new profile. `is_custom` follows the scope.
    pub fn new_record(
        id: String,
        owner_scope: &OwnerScope,
        profile: NewFeeProfile,
        now: NaiveDateTime,
    ) -> Self {
        let (ptp_amount, ptp_currency) = leg_columns(profile.legs.platform_to_payoneer);
        let (ptl_amount, ptl_currency) = leg_columns(profile.legs.platform_to_local_bank);
        let (pol_amount, pol_currency) = leg_columns(profile.legs.payoneer_to_local_bank);
        Self {
            id,
            platform_name: profile.platform_name,
            platform_fee_percentage: profile.platform_fee_percentage.to_string(),
            platform_to_payoneer_amount: ptp_amount,
            platform_to_payoneer_currency: ptp_currency,
            platform_to_local_bank_amount: ptl_amount,
            platform_to_local_bank_currency: ptl_currency,
            payoneer_to_local_bank_amount: pol_amount,
            payoneer_to_local_bank_currency: pol_currency,
            is_custom: !owner_scope.is_system(),
            owner_scope: encode_owner_scope(owner_scope),
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn encode_owner_scope(scope: &OwnerScope) -> String {
    match scope {
        OwnerScope::System => SYSTEM_SCOPE.to_string(),
        OwnerScope::User(id) => format!("{}{}", USER_SCOPE_PREFIX, id),
    }
}

pub fn decode_owner_scope(raw: &str) -> Result<OwnerScope, StorageError> {
    if raw == SYSTEM_SCOPE {
        return Ok(OwnerScope::System);
    }
    raw.strip_prefix(USER_SCOPE_PREFIX)
        .filter(|id| !id.is_empty())
        .map(OwnerScope::user)
        .ok_or_else(|| StorageError::Corrupt(format!("unrecognised owner scope '{}'", raw)))
}

fn leg_columns(leg: Option<FeeLeg>) -> (Option<String>, Option<String>) {
    match leg {
        Some(leg) => (
            Some(leg.amount.to_string()),
            Some(leg.currency.as_str().to_string()),
        ),
        None => (None, None),
    }
}

fn parse_decimal(value: &str, column: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value)
        .map_err(|e| StorageError::Corrupt(format!("{} '{}': {}", column, value, e)))
}

fn parse_leg(
    column: &str,
    amount: Option<String>,
    currency: Option<String>,
) -> Result<Option<FeeLeg>, StorageError> {
    match (amount, currency) {
        (None, None) => Ok(None),
        (Some(amount), Some(currency)) => {
            let amount = parse_decimal(&amount, column)?;
            let currency = CurrencyCode::from_str(&currency)
                .map_err(|e| StorageError::Corrupt(format!("{}: {}", column, e)))?;
            Ok(Some(FeeLeg::new(amount, currency)))
        }
        _ => Err(StorageError::Corrupt(format!(
            "{} has an amount without a currency or vice versa",
            column
        ))),
    }
}

impl TryFrom<PlatformFeeSettingDB> for FeeProfile {
    type Error = StorageError;

    fn try_from(db: PlatformFeeSettingDB) -> Result<Self, Self::Error> {
        let legs = FeeLegs {
            platform_to_payoneer: parse_leg(
                "platform_to_payoneer",
                db.platform_to_payoneer_amount,
                db.platform_to_payoneer_currency,
            )?,
            platform_to_local_bank: parse_leg(
                "platform_to_local_bank",
                db.platform_to_local_bank_amount,
                db.platform_to_local_bank_currency,
            )?,
            payoneer_to_local_bank: parse_leg(
                "payoneer_to_local_bank",
                db.payoneer_to_local_bank_amount,
                db.payoneer_to_local_bank_currency,
            )?,
        };

        Ok(FeeProfile {
            platform_fee_percentage: parse_decimal(
                &db.platform_fee_percentage,
                "platform_fee_percentage",
            )?,
            owner_scope: decode_owner_scope(&db.owner_scope)?,
            id: db.id,
            platform_name: db.platform_name,
            legs,
            is_custom: db.is_custom,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
