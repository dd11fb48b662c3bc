//! Fee profile domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PlatformFeeError;
use crate::constants::MAX_FEE_PERCENTAGE;
use crate::fx::CurrencyCode;

/// Who owns a fee profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "userId", rename_all = "lowercase")]
pub enum OwnerScope {
    /// Shared, platform-wide defaults shipped with the application.
    System,
    /// A profile created by, and visible to, a single user.
    User(String),
}

impl OwnerScope {
    pub fn user(user_id: impl Into<String>) -> Self {
        OwnerScope::User(user_id.into())
    }

    pub fn is_system(&self) -> bool {
        matches!(self, OwnerScope::System)
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            OwnerScope::System => None,
            OwnerScope::User(id) => Some(id.as_str()),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id() == Some(user_id)
    }
}

/// A flat fee charged on one hop of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeLeg {
    pub amount: Decimal,
    pub currency: CurrencyCode,
}

impl FeeLeg {
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

/// Named hops a withdrawal may pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegName {
    PlatformToPayoneer,
    PlatformToLocalBank,
    PayoneerToLocalBank,
}

impl LegName {
    pub const ALL: [LegName; 3] = [
        LegName::PlatformToPayoneer,
        LegName::PlatformToLocalBank,
        LegName::PayoneerToLocalBank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegName::PlatformToPayoneer => "platformToPayoneer",
            LegName::PlatformToLocalBank => "platformToLocalBank",
            LegName::PayoneerToLocalBank => "payoneerToLocalBank",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeLegs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_to_payoneer: Option<FeeLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_to_local_bank: Option<FeeLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payoneer_to_local_bank: Option<FeeLeg>,
}

impl FeeLegs {
    pub fn get(&self, name: LegName) -> Option<&FeeLeg> {
        match name {
            LegName::PlatformToPayoneer => self.platform_to_payoneer.as_ref(),
            LegName::PlatformToLocalBank => self.platform_to_local_bank.as_ref(),
            LegName::PayoneerToLocalBank => self.payoneer_to_local_bank.as_ref(),
        }
    }

    /// Present legs, in `LegName` order.
    pub fn iter(&self) -> impl Iterator<Item = (LegName, &FeeLeg)> + '_ {
        LegName::ALL
            .into_iter()
            .filter_map(move |name| self.get(name).map(|leg| (name, leg)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A platform's withdrawal fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeProfile {
    pub id: String,
    pub platform_name: String,
    pub platform_fee_percentage: Decimal,
    #[serde(flatten)]
    pub legs: FeeLegs,
    pub is_custom: bool,
    pub owner_scope: OwnerScope,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl FeeProfile {
    /// Well-known profiles are system-owned and never custom.
    pub fn is_well_known(&self) -> bool {
        self.owner_scope.is_system() || !self.is_custom
    }
}

/// Input model for creating a fee profile.
///
/// Ownership and the custom flag are never taken from the caller; the
/// registry derives them from the scope the profile is created under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeeProfile {
    pub platform_name: String,
    pub platform_fee_percentage: Decimal,
    #[serde(flatten)]
    pub legs: FeeLegs,
}

impl NewFeeProfile {
    pub fn new(platform_name: impl Into<String>, platform_fee_percentage: Decimal) -> Self {
        Self {
            platform_name: platform_name.into(),
            platform_fee_percentage,
            legs: FeeLegs::default(),
        }
    }

    pub fn with_leg(mut self, name: LegName, leg: FeeLeg) -> Self {
        match name {
            LegName::PlatformToPayoneer => self.legs.platform_to_payoneer = Some(leg),
            LegName::PlatformToLocalBank => self.legs.platform_to_local_bank = Some(leg),
            LegName::PayoneerToLocalBank => self.legs.payoneer_to_local_bank = Some(leg),
        }
        self
    }

    /// Checks field-level constraints before the profile reaches storage.
    pub fn validate(&self) -> Result<(), PlatformFeeError> {
        if self.platform_name.trim().is_empty() {
            return Err(PlatformFeeError::invalid("platformName", "must not be empty"));
        }

        let max = Decimal::from(MAX_FEE_PERCENTAGE);
        if self.platform_fee_percentage < Decimal::ZERO || self.platform_fee_percentage > max {
            return Err(PlatformFeeError::invalid(
                "platformFeePercentage",
                format!(
                    "must be between 0 and {}, got {}",
                    MAX_FEE_PERCENTAGE, self.platform_fee_percentage
                ),
            ));
        }

        for (name, leg) in self.legs.iter() {
            if leg.amount < Decimal::ZERO {
                return Err(PlatformFeeError::invalid(
                    name.as_str(),
                    format!("amount must not be negative, got {}", leg.amount),
                ));
            }
        }

        Ok(())
    }
}

/// Criteria for document-store lookups. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeProfileFilter {
    pub id: Option<String>,
    pub platform_name: Option<String>,
    pub owner_scope: Option<OwnerScope>,
    pub is_custom: Option<bool>,
}

impl FeeProfileFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_platform_name(mut self, platform_name: impl Into<String>) -> Self {
        self.platform_name = Some(platform_name.into());
        self
    }

    pub fn with_owner(mut self, owner_scope: OwnerScope) -> Self {
        self.owner_scope = Some(owner_scope);
        self
    }

    pub fn with_custom(mut self, is_custom: bool) -> Self {
        self.is_custom = Some(is_custom);
        self
    }

    /// System-scope, non-custom profiles.
    pub fn well_known() -> Self {
        Self::new().with_owner(OwnerScope::System).with_custom(false)
    }

    pub fn matches(&self, profile: &FeeProfile) -> bool {
        self.id.as_ref().map_or(true, |id| *id == profile.id)
            && self
                .platform_name
                .as_ref()
                .map_or(true, |name| *name == profile.platform_name)
            && self
                .owner_scope
                .as_ref()
                .map_or(true, |scope| *scope == profile.owner_scope)
            && self.is_custom.map_or(true, |c| c == profile.is_custom)
    }
}
