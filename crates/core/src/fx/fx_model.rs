use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyCode;

/// An amount tagged with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: Decimal,
    pub currency: CurrencyCode,
}

impl Money {
    pub fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }
}

/// Read-only description of a supported currency, as listed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInfo {
    pub code: CurrencyCode,
    pub symbol: String,
    pub display_name: String,
    /// Units of this currency per one unit of the pivot currency.
    pub rate: Decimal,
}
